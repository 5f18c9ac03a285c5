//! Decoder for Google Shopping RSS feeds.
//!
//! Expected shape:
//!
//! ```xml
//! <rss xmlns:g="http://base.google.com/ns/1.0" version="2.0">
//!   <channel>
//!     <item>
//!       <g:id>P1</g:id>
//!       <title>Widget</title>
//!       <g:price>10.50 USD</g:price>
//!       <g:sale_price>9.99 USD</g:sale_price>
//!       <g:shipping><g:price>4.95 USD</g:price></g:shipping>
//!     </item>
//!   </channel>
//! </rss>
//! ```
//!
//! Only direct children of `<item>` are read, so the nested shipping price
//! above never shadows the item price. The reader is event driven, which
//! means a channel with a single `<item>` is handled exactly like one with
//! many; there is no scalar-versus-list special case to get wrong.

use feedmap_core::{NormalizedRow, RawPrice};
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::FeedError;

/// Item child elements that feed a [`NormalizedRow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemField {
    Id,
    Title,
    Price,
    SalePrice,
}

impl ItemField {
    fn from_name(name: &[u8]) -> Option<Self> {
        match name {
            b"g:id" => Some(Self::Id),
            b"title" => Some(Self::Title),
            b"g:price" => Some(Self::Price),
            b"g:sale_price" => Some(Self::SalePrice),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct ItemBuilder {
    id: Option<String>,
    title: Option<String>,
    price: Option<String>,
    sale_price: Option<String>,
}

impl ItemBuilder {
    /// Stores `value` unless the field already has one; the first occurrence wins.
    fn set(&mut self, field: ItemField, value: String) {
        let slot = match field {
            ItemField::Id => &mut self.id,
            ItemField::Title => &mut self.title,
            ItemField::Price => &mut self.price,
            ItemField::SalePrice => &mut self.sale_price,
        };
        if slot.is_none() {
            *slot = Some(value);
        }
    }

    fn build(self) -> NormalizedRow {
        NormalizedRow {
            product_id: self.id,
            product_name: self.title,
            list_price: self.price.map(RawPrice::Text),
            sales_price: self.sale_price.map(RawPrice::Text),
        }
    }
}

// Element depths: rss = 1, channel = 2, item = 3, item fields = 4.
const CHANNEL_DEPTH: usize = 2;
const ITEM_DEPTH: usize = 3;
const FIELD_DEPTH: usize = 4;

/// Decodes a Google Shopping RSS document into one row per `<item>`, in
/// document order.
///
/// # Errors
///
/// - [`FeedError::Xml`] if the document is not well-formed XML.
/// - [`FeedError::MissingElement`] if the root is not `<rss>` or it has no
///   `<channel>`.
/// - [`FeedError::UnclosedElement`] if the document ends inside an element.
pub fn parse_google_shopping_feed(xml: &str) -> Result<Vec<NormalizedRow>, FeedError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut rows = Vec::new();
    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut saw_rss = false;
    let mut saw_channel = false;
    let mut item: Option<ItemBuilder> = None;
    let mut field: Option<(ItemField, String)> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.name().as_ref().to_vec();
                let depth = stack.len() + 1;
                match depth {
                    1 => {
                        if name != b"rss" {
                            return Err(FeedError::MissingElement { element: "rss" });
                        }
                        saw_rss = true;
                    }
                    CHANNEL_DEPTH if name == b"channel" => saw_channel = true,
                    ITEM_DEPTH if name == b"item" && is_channel(&stack) => {
                        item = Some(ItemBuilder::default());
                    }
                    FIELD_DEPTH if item.is_some() => {
                        field = ItemField::from_name(&name).map(|f| (f, String::new()));
                    }
                    _ => {}
                }
                stack.push(name);
            }
            Event::Empty(e) => {
                let depth = stack.len() + 1;
                let name = e.name();
                match depth {
                    1 if name.as_ref() == b"rss" => saw_rss = true,
                    1 => return Err(FeedError::MissingElement { element: "rss" }),
                    CHANNEL_DEPTH if name.as_ref() == b"channel" => saw_channel = true,
                    ITEM_DEPTH if name.as_ref() == b"item" && is_channel(&stack) => {
                        rows.push(ItemBuilder::default().build());
                    }
                    _ => {}
                }
            }
            Event::Text(e) => {
                if stack.len() == FIELD_DEPTH {
                    if let Some((_, buf)) = field.as_mut() {
                        buf.push_str(&e.unescape()?);
                    }
                }
            }
            Event::CData(e) => {
                if stack.len() == FIELD_DEPTH {
                    if let Some((_, buf)) = field.as_mut() {
                        buf.push_str(&String::from_utf8_lossy(e.as_ref()));
                    }
                }
            }
            Event::End(_) => {
                match stack.len() {
                    FIELD_DEPTH => {
                        if let (Some(builder), Some((f, buf))) = (item.as_mut(), field.take()) {
                            builder.set(f, buf.trim().to_owned());
                        }
                    }
                    ITEM_DEPTH => {
                        if let Some(builder) = item.take() {
                            rows.push(builder.build());
                        }
                    }
                    _ => {}
                }
                stack.pop();
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(FeedError::UnclosedElement {
            element: String::from_utf8_lossy(open).into_owned(),
        });
    }
    if !saw_rss {
        return Err(FeedError::MissingElement { element: "rss" });
    }
    if !saw_channel {
        return Err(FeedError::MissingElement { element: "channel" });
    }

    Ok(rows)
}

fn is_channel(stack: &[Vec<u8>]) -> bool {
    stack.last().is_some_and(|n| n == b"channel")
}

#[cfg(test)]
#[path = "google_shopping_test.rs"]
mod tests;
