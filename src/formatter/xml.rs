//! Default XML formatter

use super::XmlFormatter;
use crate::core::{platform, LoggerError};
use quick_xml::events::Event;
use quick_xml::{Reader, Writer};

/// Re-indents XML with 4 spaces per level.
///
/// Blank input yields an empty string; malformed input is returned unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultXmlFormatter;

impl DefaultXmlFormatter {
    pub fn new() -> Self {
        Self
    }

    fn reindent(xml: &str) -> quick_xml::Result<Vec<u8>> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);
        reader.check_end_names(true);

        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);
        let mut depth = 0usize;
        loop {
            match reader.read_event()? {
                Event::Eof => break,
                event => {
                    match &event {
                        Event::Start(_) => depth += 1,
                        Event::End(_) => depth = depth.saturating_sub(1),
                        _ => {}
                    }
                    writer.write_event(event)?;
                }
            }
        }

        if depth != 0 {
            return Err(quick_xml::Error::UnexpectedEof("unclosed element".to_string()));
        }
        Ok(writer.into_inner())
    }
}

impl XmlFormatter for DefaultXmlFormatter {
    fn format(&self, xml: &str) -> String {
        if xml.trim().is_empty() {
            platform::warn("Empty XML content");
            return String::new();
        }

        let formatted = Self::reindent(xml.trim())
            .map_err(|e| LoggerError::formatter("XML", e.to_string()))
            .and_then(|bytes| {
                String::from_utf8(bytes).map_err(|e| LoggerError::formatter("XML", e.to_string()))
            });
        match formatted {
            Ok(formatted) => formatted,
            Err(e) => {
                platform::warn(e.to_string());
                xml.to_string()
            }
        }
    }
}
