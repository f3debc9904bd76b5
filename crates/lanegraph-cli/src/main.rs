use lanegraph::render::{
    ConfigOverrides, DEFAULT_THEME, LayoutOptions, RenderFormat, SvgRenderOptions, ThemeRegistry,
    render_mermaid, render_svg, sanitize_svg_id,
};
use lanegraph::{DisplayOptions, Engine, ParseOptions};
use serde::Serialize;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Input { path: String, err: std::io::Error },
    Output { path: PathBuf, err: std::io::Error },
    OverwritesInput(PathBuf),
    Parse(lanegraph::Error),
    Render(lanegraph_render::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Input { path, err } => write!(f, "failed to read {path}: {err}"),
            CliError::Output { path, err } => {
                write!(f, "failed to write {}: {err}", path.display())
            }
            CliError::OverwritesInput(path) => write!(
                f,
                "output path {} is the input file; pass --out to choose another",
                path.display()
            ),
            CliError::Parse(err) => write!(f, "{err}"),
            CliError::Render(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<lanegraph::Error> for CliError {
    fn from(value: lanegraph::Error) -> Self {
        Self::Parse(value)
    }
}

impl From<lanegraph_render::Error> for CliError {
    fn from(value: lanegraph_render::Error) -> Self {
        Self::Render(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Parse,
    Layout,
    Render,
    Themes,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    strict: bool,
    verbose: bool,
    render_format: RenderFormat,
    theme: Option<String>,
    config: Option<String>,
    sets: Vec<String>,
    display: Option<DisplayOptions>,
    input_channels: Option<i64>,
    diagram_id: Option<String>,
    out: Option<String>,
}

fn usage() -> &'static str {
    "lanegraph-cli\n\
\n\
USAGE:\n\
  lanegraph-cli [parse] [--pretty] [--strict] [--show <fields>] [--input-channels <n>] [<path>|-]\n\
  lanegraph-cli layout [--pretty] [--strict] [--config <path>] [--set <key=value>]... [<path>|-]\n\
  lanegraph-cli render [--format svg|mermaid] [--theme <name>] [--config <path>] [--set <key=value>]... [--show <fields>] [--input-channels <n>] [--id <diagram-id>] [--strict] [--out <path>] [<path>|-]\n\
  lanegraph-cli themes\n\
\n\
OPTIONS:\n\
  --show <fields>   comma-separated: stride, channels, repeats, args, all, none (default: stride,channels)\n\
  --set <key=value> dotted override such as layout.node_width=180 or theme.colors.line=#333\n\
  --verbose         log debug output to stderr (RUST_LOG takes precedence)\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - parse and layout print JSON to stdout.\n\
  - render writes next to the input file (.svg / .mmd) by default, or to stdout for stdin input.\n\
  - --out - forces stdout.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "parse" => args.command = Command::Parse,
            "layout" => args.command = Command::Layout,
            "render" => args.command = Command::Render,
            "themes" => args.command = Command::Themes,
            "--pretty" => args.pretty = true,
            "--strict" => args.strict = true,
            "--verbose" | "-v" => args.verbose = true,
            "--format" => {
                let Some(fmt) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.render_format = fmt
                    .parse::<RenderFormat>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--theme" => {
                let Some(theme) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.theme = Some(theme.clone());
            }
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--set" => {
                let Some(assignment) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.sets.push(assignment.clone());
            }
            "--show" => {
                let Some(fields) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.display = Some(
                    DisplayOptions::from_field_list(fields)
                        .ok_or(CliError::Usage(usage()))?,
                );
            }
            "--input-channels" => {
                let Some(n) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let n = n.parse::<i64>().map_err(|_| CliError::Usage(usage()))?;
                if n <= 0 {
                    return Err(CliError::Usage(usage()));
                }
                args.input_channels = Some(n);
            }
            "--id" => {
                let Some(id) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.diagram_id = Some(id.clone());
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => std::fs::read_to_string(path).map_err(|err| CliError::Input {
            path: path.to_string(),
            err,
        }),
    }
}

fn write_json(value: &impl Serialize, pretty: bool, out: Option<&str>) -> Result<(), CliError> {
    let mut text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    text.push('\n');
    write_text(&text, out.map(PathBuf::from).as_deref())
}

/// Writes `text` to `out`, or to stdout when `out` is `None` or `-`.
///
/// Files are written to a sibling temporary path first and renamed into place, so a failed
/// run leaves no partial output.
fn write_text(text: &str, out: Option<&Path>) -> Result<(), CliError> {
    let Some(path) = out.filter(|p| p.as_os_str() != "-") else {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()?;
        return Ok(());
    };

    let tmp = temp_sibling(path);
    let result = std::fs::write(&tmp, text).and_then(|()| std::fs::rename(&tmp, path));
    if let Err(err) = result {
        let _ = std::fs::remove_file(&tmp);
        return Err(CliError::Output {
            path: path.to_path_buf(),
            err,
        });
    }
    println!("Saved {}", path.display());
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "out".to_string());
    path.with_file_name(format!(".{name}.{}.tmp", std::process::id()))
}

fn default_out_path(input: Option<&str>, ext: &str) -> Option<PathBuf> {
    match input {
        Some(path) if path != "-" => Some(PathBuf::from(path).with_extension(ext)),
        _ => None,
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

fn load_overrides(args: &Args) -> Result<ConfigOverrides, CliError> {
    let mut overrides = match args.config.as_deref() {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|err| CliError::Input {
                path: path.to_string(),
                err,
            })?;
            ConfigOverrides::from_yaml_str(&text)?
        }
        None => ConfigOverrides::default(),
    };
    for assignment in &args.sets {
        overrides.set_assignment(assignment)?;
    }
    Ok(overrides)
}

fn build_engine(args: &Args) -> Engine {
    let mut engine = Engine::new();
    if let Some(n) = args.input_channels {
        engine = engine.with_input_channels(n);
    }
    if let Some(display) = args.display {
        engine = engine.with_display_options(display);
    }
    engine
}

fn run(args: Args) -> Result<(), CliError> {
    let registry = ThemeRegistry::builtin();

    if let Command::Themes = args.command {
        let mut stdout = std::io::stdout().lock();
        for name in registry.names() {
            writeln!(stdout, "{name}")?;
        }
        return Ok(());
    }

    let text = read_input(args.input.as_deref())?;
    let engine = build_engine(&args);
    let options = if args.strict {
        ParseOptions::strict()
    } else {
        ParseOptions::lenient()
    };
    let overrides = load_overrides(&args)?;

    let parsed = engine.parse_model_sync(&text, options)?;
    tracing::debug!(
        nodes = parsed.nodes.len(),
        primary = parsed.primary_len,
        skipped = parsed.skipped.len(),
        "parsed model"
    );

    match args.command {
        Command::Themes => Ok(()),
        Command::Parse => write_json(&parsed, args.pretty, args.out.as_deref()),
        Command::Layout => {
            let layout_opts = LayoutOptions {
                config: overrides.layout_config()?,
            };
            let layouted = lanegraph_render::layout_parsed(&parsed, &layout_opts)?;
            write_json(&layouted, args.pretty, args.out.as_deref())
        }
        Command::Render => {
            let theme_name = args.theme.as_deref().unwrap_or(DEFAULT_THEME);
            let theme = overrides.theme(&registry, theme_name)?;

            let rendered = match args.render_format {
                RenderFormat::Svg => {
                    let layout_opts = LayoutOptions {
                        config: overrides.layout_config()?,
                    };
                    let layouted = lanegraph_render::layout_parsed(&parsed, &layout_opts)?;
                    let diagram_id = args.diagram_id.clone().unwrap_or_else(|| {
                        args.input
                            .as_deref()
                            .filter(|p| *p != "-")
                            .and_then(|p| Path::new(p).file_stem())
                            .map(|stem| sanitize_svg_id(&stem.to_string_lossy()))
                            .unwrap_or_else(|| SvgRenderOptions::default().diagram_id)
                    });
                    render_svg(&layouted, &theme, &SvgRenderOptions { diagram_id })
                }
                RenderFormat::Mermaid => render_mermaid(&parsed, &theme),
            };

            let out = args.out.as_deref().map(PathBuf::from).or_else(|| {
                default_out_path(args.input.as_deref(), args.render_format.extension())
            });
            if let (Some(out), Some(input)) = (out.as_deref(), args.input.as_deref()) {
                if input != "-" && same_file(out, Path::new(input)) {
                    return Err(CliError::OverwritesInput(out.to_path_buf()));
                }
            }
            write_text(&rendered, out.as_deref())
        }
    }
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

    init_tracing(args.verbose);

    if let Err(err) = run(args) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
