use std::io::Read;
use std::path::PathBuf;
use svg2ivg::{ConvertOptions, DefaultSize, convert_str};
use tracing::metadata::LevelFilter;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io { path: String, err: std::io::Error },
    Convert(svg2ivg::Error),
    Config(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io { path, err } => write!(f, "I/O error on {path}: {err}"),
            CliError::Convert(err) => write!(f, "{err}"),
            CliError::Config(err) => write!(f, "Config error: {err}"),
        }
    }
}

impl From<svg2ivg::Error> for CliError {
    fn from(value: svg2ivg::Error) -> Self {
        Self::Convert(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Config(value)
    }
}

fn io_error(path: &str) -> impl FnOnce(std::io::Error) -> CliError + '_ {
    move |err| CliError::Io {
        path: path.to_string(),
        err,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
}

#[derive(Debug, Default)]
struct Args {
    verbosity: Verbosity,
    input: Option<String>,
    out: Option<String>,
    default_size: Option<DefaultSize>,
    config: Option<String>,
}

fn usage() -> &'static str {
    "svg2ivg\n\
\n\
USAGE:\n\
  svg2ivg [-v|-q] [--out <path>] [--default-size <w,h>] [--config <file.json>] [<input.svg>|-] [<output.ivg>] [<w,h>]\n\
\n\
NOTES:\n\
  - If <input.svg> is omitted or '-', input is read from stdin.\n\
  - Output goes to stdout unless an output path is given.\n\
  - <w,h> is the canvas size assumed when a root <svg> has no width/height (default 800,800).\n\
  - --config reads {\"defaultWidth\": w, \"defaultHeight\": h}; an explicit size wins.\n\
"
}

fn parse_size(value: &str) -> Result<DefaultSize, CliError> {
    Ok(value.parse::<DefaultSize>()?)
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();
    let mut positional = Vec::new();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "-v" | "--verbose" => args.verbosity = Verbosity::Verbose,
            "-q" | "--quiet" => args.verbosity = Verbosity::Quiet,
            "--out" | "-o" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--default-size" => {
                let Some(size) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.default_size = Some(parse_size(size)?);
            }
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--" => positional.extend(it.by_ref().cloned()),
            "-" => positional.push(a.clone()),
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => positional.push(path.to_string()),
        }
    }

    // A trailing `w,h` is the canvas override, not an output path.
    if positional.len() >= 2 && args.default_size.is_none() {
        let last = &positional[positional.len() - 1];
        if let Ok(size) = last.parse::<DefaultSize>() {
            args.default_size = Some(size);
            positional.pop();
        }
    }
    let mut positional = positional.into_iter();
    args.input = positional.next();
    if let Some(out) = positional.next() {
        if args.out.is_some() {
            return Err(CliError::Usage(usage()));
        }
        args.out = Some(out);
    }
    if positional.next().is_some() {
        return Err(CliError::Usage(usage()));
    }
    Ok(args)
}

fn setup_tracing(verbosity: Verbosity) {
    let level = match verbosity {
        Verbosity::Quiet => LevelFilter::ERROR,
        Verbosity::Normal => LevelFilter::WARN,
        Verbosity::Verbose => LevelFilter::DEBUG,
    };
    tracing_subscriber::fmt()
        .without_time()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(io_error("<stdin>"))?;
            Ok(buf)
        }
        Some(path) => std::fs::read_to_string(path).map_err(io_error(path)),
    }
}

fn load_options(args: &Args) -> Result<ConvertOptions, CliError> {
    let mut options = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(io_error(path))?;
            serde_json::from_str::<ConvertOptions>(&text)?
        }
        None => ConvertOptions::default(),
    };
    if let Some(size) = args.default_size {
        options = options.with_default_size(size);
    }
    Ok(options)
}

fn run(args: Args) -> Result<(), CliError> {
    let options = load_options(&args)?;
    let text = read_input(args.input.as_deref())?;
    let conversion = convert_str(&text, &options)?;
    tracing::debug!(warnings = conversion.warnings.len(), "conversion finished");

    match args.out.as_deref() {
        None => print!("{}", conversion.output),
        Some(path) => {
            std::fs::write(PathBuf::from(path), &conversion.output).map_err(io_error(path))?;
            let input = args.input.as_deref().unwrap_or("-");
            eprintln!("Converted {input} to {path}");
        }
    }
    Ok(())
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    setup_tracing(args.verbosity);

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
