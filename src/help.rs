include!(concat!(env!("OUT_DIR"), "/generated_help.rs"));

/// The help text baked in at build time.
pub fn help_text() -> &'static str {
    std::str::from_utf8(EMBEDDED_HELP.content).unwrap_or_default()
}
