use anyhow::{anyhow, bail, Context};
use clap::{Parser, ValueEnum};
use rkyv::ser::{serializers::AllocSerializer, Serializer};
use serde::Serialize;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use steve_lexer::{diagnose, LexDiagnostic, Lexer, LexerConfig};
use steve_protocol::TokenStream;

#[derive(Parser)]
#[command(author, version, about = "Scans steve source files and prints their tokens")]
struct Cli {
    /// Source files to scan. `-` reads standard input.
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,

    /// JSON lexer configuration (symbol tables, classifiers, recovery policy).
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Also write the token streams as a validated rkyv archive.
    #[arg(short, long, value_name = "FILE")]
    archive: Option<PathBuf>,

    /// Exit with an error if any input produced ERROR tokens.
    #[arg(long)]
    deny_errors: bool,

    /// Do not print tokens.
    #[arg(short, long)]
    quiet: bool,

    /// Report progress on stderr.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Serialize)]
struct DiagnosticRecord<'a> {
    file: &'a str,
    line: u32,
    column: u32,
    message: String,
}

impl<'a> From<&'a LexDiagnostic> for DiagnosticRecord<'a> {
    fn from(d: &'a LexDiagnostic) -> Self {
        Self { file: &d.file, line: d.line, column: d.column, message: d.message() }
    }
}

#[derive(Serialize)]
struct LexReport<'a> {
    streams: &'a [TokenStream],
    diagnostics: Vec<DiagnosticRecord<'a>>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut stdout = std::io::stdout().lock();
    run(&cli, &mut stdout)
}

fn run(cli: &Cli, out: &mut impl Write) -> anyhow::Result<()> {
    let lexer = match &cli.config {
        Some(path) => {
            if cli.verbose {
                eprintln!("Reading lexer configuration from {:?}...", path);
            }
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read configuration {}", path.display()))?;
            let config: LexerConfig = serde_json::from_str(&text)
                .with_context(|| format!("failed to parse configuration {}", path.display()))?;
            Lexer::new(&config).context("invalid lexer configuration")?
        }
        None => Lexer::standard(),
    };

    let mut streams = Vec::with_capacity(cli.files.len());
    for path in &cli.files {
        let (name, source) = read_source(path)?;
        let stream = lexer.lex(&name, &source);
        if cli.verbose {
            eprintln!("Scanned {} ({} bytes) into {} tokens", name, source.len(), stream.len());
        }
        streams.push(stream);
    }

    let diagnostics: Vec<LexDiagnostic> = streams.iter().flat_map(diagnose).collect();
    let level = if cli.deny_errors { "error" } else { "warning" };
    for diagnostic in &diagnostics {
        eprintln!("{}: {}", level, diagnostic);
    }

    if !cli.quiet {
        match cli.format {
            OutputFormat::Text => {
                for token in streams.iter().flat_map(|s| s.iter()) {
                    writeln!(out, "{}", token)?;
                }
            }
            OutputFormat::Json => {
                let report = LexReport {
                    streams: &streams,
                    diagnostics: diagnostics.iter().map(DiagnosticRecord::from).collect(),
                };
                serde_json::to_writer_pretty(&mut *out, &report)?;
                writeln!(out)?;
            }
        }
    }

    if let Some(path) = &cli.archive {
        write_archive(path, &streams)?;
        if cli.verbose {
            eprintln!("Archive written to {:?}", path);
        }
    }

    if cli.deny_errors && !diagnostics.is_empty() {
        bail!("{} lexical error(s)", diagnostics.len());
    }
    Ok(())
}

fn read_source(path: &Path) -> anyhow::Result<(String, String)> {
    if path.as_os_str() == "-" {
        let mut source = String::new();
        std::io::stdin().read_to_string(&mut source).context("failed to read standard input")?;
        return Ok(("<stdin>".to_string(), source));
    }
    let source =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok((path.display().to_string(), source))
}

fn write_archive(path: &Path, streams: &Vec<TokenStream>) -> anyhow::Result<()> {
    let mut serializer = AllocSerializer::<4096>::default();
    serializer
        .serialize_value(streams)
        .map_err(|e| anyhow!("failed to archive token streams: {:?}", e))?;
    let bytes = serializer.into_serializer().into_inner();

    // Readers use check_archived_root, so never write an archive that fails it.
    rkyv::check_archived_root::<Vec<TokenStream>>(&bytes)
        .map_err(|e| anyhow!("archive failed validation: {:?}", e))?;

    fs::write(path, &bytes).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rkyv::Deserialize;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from(["steve-lex", "-f", "json", "--deny-errors", "a.st", "b.st"])
            .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.deny_errors);
        assert_eq!(cli.files, vec![PathBuf::from("a.st"), PathBuf::from("b.st")]);
        assert!(Cli::try_parse_from(["steve-lex"]).is_err());
    }

    fn source_file(tag: &str, source: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("steve-lex-{}-{}.st", std::process::id(), tag));
        fs::write(&path, source).unwrap();
        path
    }

    #[test]
    fn test_deny_errors_fails_after_printing() {
        let path = source_file("deny", "x = @\n");
        let arg = path.to_str().unwrap();

        let mut out = Vec::new();
        let cli = Cli::try_parse_from(["steve-lex", "--deny-errors", arg]).unwrap();
        let err = run(&cli, &mut out).unwrap_err();
        assert_eq!(err.to_string(), "1 lexical error(s)");
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 4);
        assert!(text.contains("Value: @, Type: ERROR"));

        let mut out = Vec::new();
        let cli = Cli::try_parse_from(["steve-lex", "-q", arg]).unwrap();
        run(&cli, &mut out).unwrap();
        assert!(out.is_empty());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_json_report_shape() {
        let path = source_file("json", "a >= 1 $");
        let arg = path.to_str().unwrap();

        let mut out = Vec::new();
        let cli = Cli::try_parse_from(["steve-lex", "--format", "json", arg]).unwrap();
        run(&cli, &mut out).unwrap();
        let _ = fs::remove_file(&path);

        let report: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let tokens = report["streams"][0]["tokens"].as_array().unwrap();
        assert_eq!(report["streams"][0]["file"], arg);
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[1]["kind"], "GTEQ");
        assert_eq!(tokens[1]["column"], 3);

        let diagnostics = report["diagnostics"].as_array().unwrap();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0]["column"], 8);
        assert_eq!(diagnostics[0]["message"], "unrecognized input `$`");
    }

    #[test]
    fn test_archive_round_trip() {
        let streams = vec![steve_lexer::lex("a.st", "x1 >= 10\n"), steve_lexer::lex("b.st", "'c'")];
        let path = std::env::temp_dir().join(format!("steve-lex-{}.rkyv", std::process::id()));
        write_archive(&path, &streams).unwrap();

        let bytes = fs::read(&path).unwrap();
        let _ = fs::remove_file(&path);
        let mut aligned = rkyv::AlignedVec::new();
        aligned.extend_from_slice(&bytes);
        let archived = rkyv::check_archived_root::<Vec<TokenStream>>(&aligned).unwrap();
        let restored: Vec<TokenStream> = archived.deserialize(&mut rkyv::Infallible).unwrap();
        assert_eq!(restored, streams);
    }
}
