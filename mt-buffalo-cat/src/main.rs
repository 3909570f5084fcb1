use clap::Parser;
use colored::*;
use mt_buffalo_cat::{ParameterSpec, PayloadParser};

/// `cat` for Z-Stack MT command parameters.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The hex encoded parameter payload, without framing or checksum.
    #[clap(value_parser(clap::builder::NonEmptyStringValueParser::new()))]
    input: String,

    /// The parameter layout in wire order, as `name:TYPE[:length]`.
    /// `length` may be `@name` to use the value of an earlier parameter.
    #[arg(short, long = "param", required = true)]
    params: Vec<ParameterSpec>,
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    match PayloadParser::parse_hex(&args.input, &args.params) {
        Ok(output) => print!("{output}"),
        Err(e) => {
            log::debug!("{e:?}");
            eprintln!("{}: {e}", "error".red().bold());
            std::process::exit(1);
        }
    }
}
