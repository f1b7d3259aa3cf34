//! Streams an OSIS document through [`OsisToHtml`] with quick-xml.
//!
//! Character data is handed over as it appears in the source, entity references included, since
//! the output is HTML and they are still valid there. Attribute values are unescaped. Element names
//! lose any namespace prefix.

use miette::NamedSource;
use quick_xml::Reader;
use quick_xml::encoding::Decoder;
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};

use crate::RenderedPassage;
use crate::attributes::Attributes;
use crate::dispatcher::OsisToHtml;
use crate::error::{RenderError, XmlError};
use crate::params::RenderParameters;

/// Renders a complete OSIS fragment or document.
#[tracing::instrument(skip_all, fields(len = xml.len()))]
pub fn render_osis(xml: &str, params: &RenderParameters) -> Result<RenderedPassage, RenderError> {
    render_named_osis("osis", xml, params)
}

/// As [`render_osis`], naming the source in error reports.
pub fn render_named_osis(
    source_name: &str,
    xml: &str,
    params: &RenderParameters,
) -> Result<RenderedPassage, RenderError> {
    let mut renderer = OsisToHtml::new(params);
    renderer.start_document();
    stream_osis(&mut renderer, source_name, xml)?;
    renderer.end_document();
    Ok(renderer.into_output())
}

/// Feeds the events of `xml` into a renderer without starting or ending the document, so several
/// fragments can make up one passage.
pub fn stream_osis(
    renderer: &mut OsisToHtml<'_>,
    source_name: &str,
    xml: &str,
) -> Result<(), XmlError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);
    let decoder = reader.decoder();
    let mut buf = Vec::new();

    let fail = |message: String, offset: usize| {
        XmlError::new(message, NamedSource::new(source_name, xml.to_string()), offset)
    };

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let (name, attrs) = element(decoder, e)
                    .map_err(|err| fail(err, offset(reader.buffer_position())))?;
                renderer.start_element(&name, &attrs);
            }
            Ok(Event::Empty(ref e)) => {
                let (name, attrs) = element(decoder, e)
                    .map_err(|err| fail(err, offset(reader.buffer_position())))?;
                renderer.start_element(&name, &attrs);
                renderer.end_element(&name);
            }
            Ok(Event::End(ref e)) => {
                let local = e.local_name();
                let name = decoder
                    .decode(local.as_ref())
                    .map_err(|err| fail(err.to_string(), offset(reader.buffer_position())))?;
                renderer.end_element(&name);
            }
            Ok(Event::Text(ref e)) => {
                let text = decoder
                    .decode(e)
                    .map_err(|err| fail(err.to_string(), offset(reader.buffer_position())))?;
                renderer.characters(&text);
            }
            Ok(Event::CData(ref e)) => {
                let text = decoder
                    .decode(e)
                    .map_err(|err| fail(err.to_string(), offset(reader.buffer_position())))?;
                renderer.characters(&escape(&*text));
            }
            Ok(Event::Eof) => break,
            Err(err) => {
                let at = offset(reader.error_position());
                return Err(fail(err.to_string(), at).with_advice(
                    "OSIS input must be well-formed XML; fragments may have several root elements",
                ));
            }
            // declarations, comments, processing instructions
            Ok(_) => {}
        }
        buf.clear();
    }
    Ok(())
}

/// Reader positions are `u64` in recent quick-xml releases.
fn offset(position: impl TryInto<usize>) -> usize {
    position.try_into().unwrap_or(usize::MAX)
}

fn element(decoder: Decoder, e: &BytesStart<'_>) -> Result<(String, Attributes), String> {
    let local = e.local_name();
    let name = decoder
        .decode(local.as_ref())
        .map_err(|err| err.to_string())?
        .into_owned();
    let mut attrs = Attributes::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| err.to_string())?;
        let local = attr.key.local_name();
        let key = decoder
            .decode(local.as_ref())
            .map_err(|err| err.to_string())?;
        let value = attr.unescape_value().map_err(|err| err.to_string())?;
        attrs.insert(&*key, &*value);
    }
    Ok((name, attrs))
}
