use std::io::{Cursor, Write};

use chrono::{DateTime, Utc};
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::item::FeedItem;

pub const CHANNEL_TITLE: &str = "SHT sjøfart – fiskefartøy";
pub const CHANNEL_LINK: &str = "https://havarikommisjonen.no/Sjoefart/Avgitte-rapporter";
const CHANNEL_DESCRIPTION: &str = "Alle SHT-rapporter filtrert på fiskefartøy";

/// Serialize the rendered items into a complete RSS 2.0 document.
///
/// Items are written in the order given, which is the API's page order after
/// filtering. `now` becomes the channel's `lastBuildDate`. Title and
/// description are wrapped in CDATA so report text is embedded verbatim.
pub fn assemble(items: &[FeedItem], now: DateTime<Utc>) -> crate::Result<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut rss = BytesStart::new("rss");
    rss.push_attribute(("version", "2.0"));
    writer.write_event(Event::Start(rss))?;
    writer.write_event(Event::Start(BytesStart::new("channel")))?;

    write_text(&mut writer, "title", CHANNEL_TITLE)?;
    write_text(&mut writer, "link", CHANNEL_LINK)?;
    write_text(&mut writer, "description", CHANNEL_DESCRIPTION)?;
    write_text(&mut writer, "lastBuildDate", &now.to_rfc2822())?;

    for item in items {
        write_item(&mut writer, item)?;
    }

    writer.write_event(Event::End(BytesEnd::new("channel")))?;
    writer.write_event(Event::End(BytesEnd::new("rss")))?;

    let mut bytes = writer.into_inner().into_inner();
    bytes.write_all(b"\n")?;
    Ok(String::from_utf8(bytes)?)
}

fn write_item<W: std::io::Write>(writer: &mut Writer<W>, item: &FeedItem) -> crate::Result<()> {
    writer.write_event(Event::Start(BytesStart::new("item")))?;

    write_cdata(writer, "title", &item.title)?;
    write_text(writer, "link", &item.link)?;

    let mut guid = BytesStart::new("guid");
    guid.push_attribute(("isPermaLink", "false"));
    writer.write_event(Event::Start(guid))?;
    writer.write_event(Event::Text(BytesText::new(&item.guid)))?;
    writer.write_event(Event::End(BytesEnd::new("guid")))?;

    write_text(writer, "pubDate", &item.pub_date)?;
    write_cdata(writer, "description", &item.description)?;

    writer.write_event(Event::End(BytesEnd::new("item")))?;
    Ok(())
}

fn write_text<W: std::io::Write>(
    writer: &mut Writer<W>,
    tag: &str,
    text: &str,
) -> crate::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn write_cdata<W: std::io::Write>(
    writer: &mut Writer<W>,
    tag: &str,
    text: &str,
) -> crate::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::CData(BytesCData::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}
