use std::io::Cursor;

use chrono::{DateTime, NaiveTime, Utc};
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::util::post_date::PostDate;

/* Example
<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom" xmlns:content="http://purl.org/rss/1.0/modules/content/">
<channel>
  <title>Adam Drewery's Blog</title>
  <link>https://blog.drewery.uk</link>
  <description></description>
  <language>en</language>
  <managingEditor>Adam Drewery</managingEditor>
  <webMaster>Adam Drewery</webMaster>
  <pubDate>Thu, 17 Oct 2024 10:00:00 +0000</pubDate>
  <atom:link href="https://raw.githubusercontent.com/adam-drewery/blog/main/rss.xml" rel="self" type="application/rss+xml"/>
  <item>
    <title>Hello World</title>
    <link>https://blog.drewery.uk/post/hello-world</link>
    <guid isPermaLink="true">https://blog.drewery.uk/post/hello-world</guid>
    <description><![CDATA[First post]]></description>
    <content:encoded><![CDATA[<h1>Hello World</h1>]]></content:encoded>
    <pubDate>Mon, 1 Jan 2024 00:00:00 +0000</pubDate>
  </item>
</channel>
</rss>
*/

pub struct FeedItem {
    pub title: String,
    pub link: String,
    pub description: String,
    pub content_html: String,
    pub date: PostDate,
}

pub struct FeedChannel<'a> {
    pub ch_title: &'a str,
    pub ch_link: &'a str,
    pub ch_desc: &'a str,
    pub ch_language: &'a str,
    pub ch_editor: &'a str,
    pub ch_web_master: &'a str,
    pub feed_url: &'a str,
    pub pub_date: DateTime<Utc>,
}

impl<'a> FeedChannel<'a> {
    pub fn render(&self, items: &[FeedItem]) -> quick_xml::Result<Vec<u8>> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));

        let decl = Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None));
        writer.write_event(decl)?;

        let mut rss = BytesStart::new("rss");
        rss.push_attribute(("version", "2.0"));
        rss.push_attribute(("xmlns:atom", "http://www.w3.org/2005/Atom"));
        rss.push_attribute(("xmlns:content", "http://purl.org/rss/1.0/modules/content/"));
        writer.write_event(Event::Start(rss))?;

        writer.write_event(Event::Start(BytesStart::new("channel")))?;

        push_text(&mut writer, "title", self.ch_title)?;
        push_text(&mut writer, "link", self.ch_link)?;
        push_text(&mut writer, "description", self.ch_desc)?;
        push_text(&mut writer, "language", self.ch_language)?;
        push_text(&mut writer, "managingEditor", self.ch_editor)?;
        push_text(&mut writer, "webMaster", self.ch_web_master)?;
        push_text(&mut writer, "pubDate", &self.pub_date.to_rfc2822())?;

        let mut self_link = BytesStart::new("atom:link");
        self_link.push_attribute(("href", self.feed_url));
        self_link.push_attribute(("rel", "self"));
        self_link.push_attribute(("type", "application/rss+xml"));
        writer.write_event(Event::Empty(self_link))?;

        for item in items {
            writer.write_event(Event::Start(BytesStart::new("item")))?;

            push_text(&mut writer, "title", item.title.as_str())?;
            push_text(&mut writer, "link", item.link.as_str())?;

            let mut guid_elem = BytesStart::new("guid");
            guid_elem.push_attribute(("isPermaLink", "true"));
            writer.write_event(Event::Start(guid_elem))?;
            writer.write_event(Event::Text(BytesText::new(item.link.as_str())))?;
            writer.write_event(Event::End(BytesEnd::new("guid")))?;

            push_cdata(&mut writer, "description", item.description.as_str())?;
            push_cdata(&mut writer, "content:encoded", item.content_html.as_str())?;

            // Posts only carry a day, published at midnight UTC
            let published = item.date.0.and_time(NaiveTime::MIN).and_utc();
            push_text(&mut writer, "pubDate", &published.to_rfc2822())?;

            writer.write_event(Event::End(BytesEnd::new("item")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("channel")))?;
        writer.write_event(Event::End(BytesEnd::new("rss")))?;

        Ok(writer.into_inner().into_inner())
    }
}

pub fn post_link(site_url: &str, id: &str) -> String {
    format!("{}/post/{}", site_url.trim_end_matches('/'), id)
}

fn push_text(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn push_cdata(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    if text.contains("]]>") {
        let new_text = text.replace("]]>", "]] >");
        writer.write_event(Event::CData(BytesCData::new(&new_text)))?;
    } else {
        writer.write_event(Event::CData(BytesCData::new(text)))?;
    }
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::str;
    use std::str::FromStr;

    use chrono::TimeZone;

    use super::*;

    fn create_item(id: &str, date: &str) -> FeedItem {
        FeedItem {
            title: format!("title-of-{}", id),
            link: post_link("https://blog.test/", id),
            description: format!("summary-of-{}", id),
            content_html: format!("<p>body of {}</p>", id),
            date: PostDate::from_str(date).unwrap(),
        }
    }

    fn channel() -> FeedChannel<'static> {
        FeedChannel {
            ch_title: "my feed",
            ch_link: "https://blog.test",
            ch_desc: "My blog & feed",
            ch_language: "en",
            ch_editor: "Adam",
            ch_web_master: "Adam",
            feed_url: "https://blog.test/rss.xml",
            pub_date: Utc.with_ymd_and_hms(2024, 10, 17, 10, 0, 0).unwrap(),
        }
    }

    #[test]
    fn render_xml() {
        let items = vec![create_item("hello", "01-01-2024"), create_item("second", "02-01-2024")];
        let xml = channel().render(&items).unwrap();
        assert_eq!(str::from_utf8(&xml).unwrap(), EXPECTED);
    }

    #[test]
    fn render_escapes_cdata_end() {
        let mut item = create_item("tricky", "01-01-2024");
        item.content_html = "<pre>a]]>b</pre>".to_string();
        let xml = channel().render(&[item]).unwrap();
        let xml = str::from_utf8(&xml).unwrap();
        assert!(xml.contains("<content:encoded><![CDATA[<pre>a]] >b</pre>]]></content:encoded>"));
    }

    #[test]
    fn render_empty_channel() {
        let xml = channel().render(&[]).unwrap();
        let xml = str::from_utf8(&xml).unwrap();
        assert!(!xml.contains("<item>"));
        assert!(xml.ends_with("</channel></rss>"));
    }

    #[test]
    fn test_post_link() {
        assert_eq!(post_link("https://blog.test", "a"), "https://blog.test/post/a");
        assert_eq!(post_link("https://blog.test/", "a"), "https://blog.test/post/a");
    }

    const EXPECTED: &str = r##"<?xml version="1.0" encoding="UTF-8"?><rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom" xmlns:content="http://purl.org/rss/1.0/modules/content/"><channel><title>my feed</title><link>https://blog.test</link><description>My blog &amp; feed</description><language>en</language><managingEditor>Adam</managingEditor><webMaster>Adam</webMaster><pubDate>Thu, 17 Oct 2024 10:00:00 +0000</pubDate><atom:link href="https://blog.test/rss.xml" rel="self" type="application/rss+xml"/><item><title>title-of-hello</title><link>https://blog.test/post/hello</link><guid isPermaLink="true">https://blog.test/post/hello</guid><description><![CDATA[summary-of-hello]]></description><content:encoded><![CDATA[<p>body of hello</p>]]></content:encoded><pubDate>Mon, 1 Jan 2024 00:00:00 +0000</pubDate></item><item><title>title-of-second</title><link>https://blog.test/post/second</link><guid isPermaLink="true">https://blog.test/post/second</guid><description><![CDATA[summary-of-second]]></description><content:encoded><![CDATA[<p>body of second</p>]]></content:encoded><pubDate>Tue, 2 Jan 2024 00:00:00 +0000</pubDate></item></channel></rss>"##;
}
