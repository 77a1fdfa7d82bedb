//! Profile links shown in the site header.

pub const GITHUB: &str = "https://github.com/adam-drewery";
pub const STACK_OVERFLOW: &str = "https://stackoverflow.com/users/1228263/adam-drewery";
pub const LINKEDIN: &str = "https://www.linkedin.com/in/adam-drewery-57678792/";

pub const PROFILES: [(&str, &str); 3] = [
    ("GitHub", GITHUB),
    ("Stack Overflow", STACK_OVERFLOW),
    ("LinkedIn", LINKEDIN),
];
