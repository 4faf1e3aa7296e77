// src/xmltv.rs
//! XMLTV feed parser: `<tv><channel>...</channel></tv>` into [`TvListing`].
//!
//! The wire structs mirror the document shape; only the fields the listing
//! model needs are read, everything else in the feed is ignored.

use std::io::BufRead;

use quick_xml::de::from_reader;
use serde::Deserialize;

use crate::listing::{AppLink, Channel, TvListing};

#[derive(Debug, Deserialize)]
struct Tv {
    #[serde(rename = "channel", default)]
    channel: Vec<XmlChannel>,
}

#[derive(Debug, Deserialize)]
struct XmlChannel {
    #[serde(rename = "display-number")]
    display_number: Option<String>,
    #[serde(rename = "display-name")]
    display_name: Option<String>,
    icon: Option<XmlIcon>,
    #[serde(rename = "app-link")]
    app_link: Option<XmlAppLink>,
}

#[derive(Debug, Deserialize)]
struct XmlIcon {
    #[serde(rename = "@src")]
    src: Option<String>,
}

#[derive(Debug, Deserialize)]
struct XmlAppLink {
    #[serde(rename = "@text")]
    text: Option<String>,
    #[serde(rename = "@color")]
    color: Option<String>,
    #[serde(rename = "@poster-uri")]
    poster_uri: Option<String>,
    #[serde(rename = "@intent-uri")]
    intent_uri: Option<String>,
}

/// Parse a buffered XMLTV stream into a listing. Channel order follows the
/// document.
pub fn parse(reader: impl BufRead) -> Result<TvListing, quick_xml::DeError> {
    let tv: Tv = from_reader(reader)?;
    let channels = tv
        .channel
        .into_iter()
        .map(|c| Channel {
            display_number: c.display_number.unwrap_or_default(),
            display_name: c.display_name.unwrap_or_default(),
            icon_uri: c.icon.and_then(|i| i.src),
            app_link: c.app_link.map(|a| AppLink {
                text: a.text,
                color: a.color,
                poster_uri: a.poster_uri,
                intent_uri: a.intent_uri,
            }),
        })
        .collect();
    Ok(TvListing { channels })
}
