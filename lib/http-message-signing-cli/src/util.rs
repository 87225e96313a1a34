use crate::args::MessageArgs;
use http_message_signing::Headers;
use miette::IntoDiagnostic;
use owo_colors::{OwoColorize, Stream};
use std::fmt::Display;
use tokio::fs;

#[inline]
pub fn error_kaomoji() -> impl Display {
    "(┬┬﹏┬┬)".if_supports_color(Stream::Stdout, |text| text.red())
}

#[inline]
pub fn success_kaomoji() -> impl Display {
    "(^///^)".if_supports_color(Stream::Stdout, |text| text.green())
}

/// Parse `Name: value` pairs into a header list
pub fn parse_headers(raw_headers: &[String]) -> miette::Result<Headers> {
    raw_headers
        .iter()
        .map(|raw| {
            let Some((name, value)) = raw.split_once(':') else {
                miette::bail!("Header `{raw}` isn't in the `Name: value` format");
            };

            Ok((name.trim(), value.trim()))
        })
        .collect()
}

/// Read the body file, if one was passed
pub async fn read_body(args: &MessageArgs) -> miette::Result<Option<Vec<u8>>> {
    let Some(ref path) = args.body else {
        return Ok(None);
    };

    fs::read(path).await.into_diagnostic().map(Some)
}

pub async fn read_to_string(path: &std::path::Path) -> miette::Result<String> {
    fs::read_to_string(path).await.into_diagnostic()
}
