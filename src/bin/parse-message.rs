//! `parse-message` -- a small driver around [`imf_codec`] for inspecting
//! a single RFC 5322 message: read it from a file (or stdin), decode
//! it, and print it back in one of a few output shapes. Not part of the
//! core codec; exists to exercise it end-to-end.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgEnum, Parser};
use imf_codec::encode::{EncoderOptions, MessageEncoder};
use imf_codec::framing::{DecoderOptions, MessageDecoder};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ArgEnum)]
enum Output {
    /// Echo the input bytes back unchanged.
    Raw,
    /// A human-readable dump of every decoded field.
    Syntax,
    /// One "field \"Name\": reason" line per field with a decode error.
    Errors,
    /// Canonical re-encoding of the decoded message.
    Encoded,
}

#[derive(Parser, Debug)]
#[clap(name = "parse-message", about = "Decode an RFC 5322 message and print it back")]
struct Args {
    /// Path to the message, or "-"/omitted to read standard input.
    path: Option<PathBuf>,

    #[clap(long, arg_enum, default_value = "syntax")]
    output: Output,
}

fn read_input(path: &Option<PathBuf>) -> io::Result<Vec<u8>> {
    match path {
        None => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
        Some(p) if p.as_os_str() == "-" => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
        Some(p) => fs::read(p),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let data = match read_input(&args.path) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("error: cannot read input: {e}");
            return ExitCode::FAILURE;
        }
    };

    if args.output == Output::Raw {
        if io::stdout().write_all(&data).is_err() {
            return ExitCode::FAILURE;
        }
        return ExitCode::SUCCESS;
    }

    let opts = DecoderOptions {
        mixed_eol: true,
        ..Default::default()
    };
    let msg = match MessageDecoder::decode_all(opts, &data) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("error: invalid message: {e}");
            return ExitCode::FAILURE;
        }
    };

    match args.output {
        Output::Raw => unreachable!("handled above"),
        Output::Syntax => {
            for field in &msg.header {
                println!("{:?}", field);
            }
            if !msg.body.is_empty() {
                println!("{}", String::from_utf8_lossy(&msg.body));
            }
            ExitCode::SUCCESS
        }
        Output::Errors => {
            let mut any = false;
            for field in msg.errors() {
                any = true;
                println!("field \"{}\": {}", field.name, field.error.as_deref().unwrap_or(""));
            }
            if any {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Output::Encoded => {
            match MessageEncoder::new(&msg, EncoderOptions::default()).encode() {
                Ok(bytes) => {
                    if io::stdout().write_all(&bytes).is_err() {
                        return ExitCode::FAILURE;
                    }
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("error: cannot encode message: {e}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}
