pub mod post_date;
