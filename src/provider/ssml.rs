//! SSML document construction.

/// Wrap a message in a prosody-rate SSML document.
///
/// The message goes into a CDATA section so that markup-like text is read
/// literally instead of being parsed into the synthesis request.
pub fn prosody_document(message: &str, speed_percent: u32) -> String {
    format!(
        r#"<speak><prosody rate="{speed_percent}%"><![CDATA[{}]]></prosody></speak>"#,
        escape_cdata(message)
    )
}

/// A `]]>` inside the message would close the CDATA section early; split it
/// across two sections so the full sequence stays literal.
fn escape_cdata(message: &str) -> String {
    message.replace("]]>", "]]]]><![CDATA[>")
}
