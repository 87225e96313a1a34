use clap::{Args, Parser, Subcommand, ValueEnum};
use http::Method;
use std::path::PathBuf;

#[derive(Clone, Copy, PartialEq, ValueEnum)]
pub enum SignatureScheme {
    Cavage,
}

#[derive(Args)]
pub struct ParseHeaderArgs {
    /// The header to parse
    pub header: String,

    /// The scheme this header uses
    #[arg(
        default_value_t = SignatureScheme::Cavage,
        long,
        short,
        value_enum,
    )]
    pub scheme: SignatureScheme,
}

#[derive(Args)]
pub struct ParseInputArgs {
    /// Value of the `Signature` header
    #[arg(long)]
    pub signature: String,

    /// Value of the `Signature-Input` header
    #[arg(long)]
    pub signature_input: String,
}

#[derive(Args)]
pub struct MessageArgs {
    /// HTTP method of the request
    #[arg(long, short, default_value_t = Method::GET)]
    pub method: Method,

    /// Request target (path and query)
    #[arg(long, short, default_value = "/")]
    pub url: String,

    /// Header in the `Name: value` format. Can be repeated.
    #[arg(long = "header", short = 'H')]
    pub headers: Vec<String>,

    /// File containing the serialised body
    #[arg(long, short)]
    pub body: Option<PathBuf>,
}

#[derive(Args)]
pub struct SignArgs {
    /// PKCS#8 PEM file containing the private key (RSA or Ed25519)
    #[arg(long, short)]
    pub key: PathBuf,

    /// Identifier of the key, embedded into the signature
    #[arg(long)]
    pub key_id: String,

    /// TOML file with the signing configuration
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub message: MessageArgs,
}

#[derive(Args)]
pub struct VerifyArgs {
    /// SPKI PEM file containing the public key (RSA or Ed25519)
    #[arg(long, short)]
    pub key: PathBuf,

    /// Identifier of the key. Signatures made with any other key are rejected.
    #[arg(long)]
    pub key_id: String,

    #[command(flatten)]
    pub message: MessageArgs,
}

#[derive(Subcommand)]
pub enum ToolSubcommand {
    /// Parse the HTTP Signature header and report any format errors
    ParseHeader(ParseHeaderArgs),

    /// Parse a `Signature`/`Signature-Input` header pair and print the signature metadata
    ParseInput(ParseInputArgs),

    /// Sign a request and print the headers to attach
    Sign(SignArgs),

    /// Verify the signature of a request
    Verify(VerifyArgs),
}

#[derive(Parser)]
#[command(about, version)]
pub struct ToolArgs {
    #[clap(subcommand)]
    pub subcommand: ToolSubcommand,
}
