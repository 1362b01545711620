//! CLI for hashing a password with a salted, adaptive hash.
//!
//! ## Usage
//!
//! ```bash
//! # Hash the default credential (Admin123) with bcrypt, cost 12
//! hashpass
//!
//! # Hash a given plaintext, or read it from stdin
//! hashpass "my secret"
//! echo "my secret" | hashpass -
//!
//! # Pick the scheme and work factor
//! hashpass --cost 14 "my secret"
//! hashpass --scheme argon2id --memory-cost 65536 --time-cost 3 "my secret"
//!
//! # Check a plaintext against an existing hash
//! hashpass --verify '$2b$12$...' "my secret"
//!
//! # Generate shell completions
//! source <(COMPLETE=bash hashpass)
//! ```

use std::ffi::OsString;
use std::io::{self, Read};
use std::process::ExitCode;

use clap::{CommandFactory, Parser, ValueEnum};
use clap_complete::Shell;
use thiserror::Error;
use tracing::debug;
use zeroize::Zeroizing;

use hashpass_lib::{
    Argon2Settings, DEFAULT_BCRYPT_COST, DEFAULT_MEMORY_COST_KIB, DEFAULT_PARALLELISM,
    DEFAULT_TIME_COST, HashError, HashScheme, HasherConfig, PasswordHasher, Plaintext,
};

/// Label printed above a freshly issued hash.
const HASH_LABEL: &str = "Hashed Password: ";

/// Label printed above a verification result.
const VERIFY_LABEL: &str = "Password Verified: ";

/// Stdin is read this many bytes at a time.
const STDIN_CHUNK: usize = 1024;

/// Hash a password with bcrypt or Argon2id
#[derive(Parser)]
#[command(name = "hashpass", version, about = "Hash a password with bcrypt or Argon2id", long_about = None)]
#[command(after_help = AFTER_HELP)]
struct Cli {
    /// Plaintext to hash (use "-" to read from stdin) [default: Admin123]
    #[arg(value_name = "PLAINTEXT")]
    plaintext: Option<OsString>,

    /// Hash scheme to issue
    #[arg(short, long, value_enum, default_value_t = SchemeArg::Bcrypt)]
    scheme: SchemeArg,

    /// bcrypt cost factor (4-31)
    #[arg(short, long, value_name = "N", default_value_t = DEFAULT_BCRYPT_COST)]
    cost: u32,

    /// Argon2id memory cost in KiB
    #[arg(long, value_name = "KIB", default_value_t = DEFAULT_MEMORY_COST_KIB)]
    memory_cost: u32,

    /// Argon2id iterations
    #[arg(long, value_name = "N", default_value_t = DEFAULT_TIME_COST)]
    time_cost: u32,

    /// Argon2id lanes
    #[arg(long, value_name = "N", default_value_t = DEFAULT_PARALLELISM)]
    parallelism: u32,

    /// Verify the plaintext against this encoded hash instead of hashing
    #[arg(
        long,
        value_name = "HASH",
        conflicts_with_all = ["scheme", "cost", "memory_cost", "time_cost", "parallelism"]
    )]
    verify: Option<String>,

    /// Print only the result line, without the label
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum SchemeArg {
    Bcrypt,
    Argon2id,
}

impl From<SchemeArg> for HashScheme {
    fn from(value: SchemeArg) -> Self {
        match value {
            SchemeArg::Bcrypt => HashScheme::Bcrypt,
            SchemeArg::Argon2id => HashScheme::Argon2id,
        }
    }
}

const AFTER_HELP: &str = "\
SHELL COMPLETIONS:
  Enable tab completions by adding one line to your shell config:

  Bash (~/.bashrc):
    source <(COMPLETE=bash hashpass)

  Zsh (~/.zshrc):
    source <(COMPLETE=zsh hashpass)

  Fish (~/.config/fish/config.fish):
    COMPLETE=fish hashpass | source

EXIT STATUS:
  0  hash issued, or plaintext matched
  1  plaintext did not match (--verify)
  2  invalid input, configuration or hash

EXAMPLES:
  hashpass                                  # bcrypt hash of Admin123
  hashpass \"secret\"                         # bcrypt hash, cost 12
  hashpass --cost 10 \"secret\"               # cheaper bcrypt hash
  hashpass --scheme argon2id \"secret\"       # Argon2id PHC string
  echo \"secret\" | hashpass -                # plaintext from stdin
  hashpass --verify '$2b$12$...' \"secret\"   # check against a hash
";

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Hash(#[from] HashError),

    #[error("failed to read plaintext from stdin: {0}")]
    Stdin(#[source] io::Error),
}

/// What a successful run produced.
enum Outcome {
    Hashed,
    Matched,
    Mismatched,
}

fn main() -> ExitCode {
    // Check for shell completion generation before parsing args
    if let Ok(shell_name) = std::env::var("COMPLETE") {
        generate_completions(&shell_name);
        return ExitCode::SUCCESS;
    }

    // Logs go to stderr so stdout stays at the two result lines
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(io::stderr)
            .init();
    }

    let cli = Cli::parse();

    match run(&cli) {
        Ok(Outcome::Hashed | Outcome::Matched) => ExitCode::SUCCESS,
        Ok(Outcome::Mismatched) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> Result<Outcome, CliError> {
    let plaintext = get_plaintext(cli)?;

    if let Some(ref encoded) = cli.verify {
        let matched = PasswordHasher::default().verify(&plaintext, encoded)?;
        print_result(cli, VERIFY_LABEL, &matched.to_string());
        return Ok(if matched {
            Outcome::Matched
        } else {
            Outcome::Mismatched
        });
    }

    let hasher = PasswordHasher::new(build_config(cli))?;
    let hash = hasher.hash(&plaintext)?;
    print_result(cli, HASH_LABEL, hash.as_str());

    Ok(Outcome::Hashed)
}

fn build_config(cli: &Cli) -> HasherConfig {
    HasherConfig::default()
        .with_scheme(cli.scheme.into())
        .with_bcrypt_cost(cli.cost)
        .with_argon2(Argon2Settings::new(
            cli.memory_cost,
            cli.time_cost,
            cli.parallelism,
        ))
}

fn print_result(cli: &Cli, label: &str, value: &str) {
    if !cli.quiet {
        println!("{label}");
    }
    println!("{value}");
}

/// Get the plaintext from the positional arg, stdin, or the default credential.
fn get_plaintext(cli: &Cli) -> Result<Plaintext, CliError> {
    match cli.plaintext.as_deref() {
        Some(arg) if arg == "-" => {
            debug!("reading plaintext from stdin");
            let mut bytes = read_from_stdin()?;
            Ok(Plaintext::from_bytes(std::mem::take(&mut *bytes))?)
        }
        Some(arg) => Ok(Plaintext::from_os_string(arg.to_os_string())?),
        None => {
            debug!("no plaintext given, using the default credential");
            Ok(Plaintext::default())
        }
    }
}

/// Read raw plaintext bytes from stdin, dropping one trailing line ending.
///
/// The buffer is grown by hand so every intermediate allocation is wiped
/// when it is replaced.
fn read_from_stdin() -> Result<Zeroizing<Vec<u8>>, CliError> {
    let mut bytes = Zeroizing::new(Vec::with_capacity(STDIN_CHUNK));
    let mut chunk = Zeroizing::new([0u8; STDIN_CHUNK]);
    let mut stdin = io::stdin().lock();

    loop {
        let read = match stdin.read(&mut chunk[..]) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(CliError::Stdin(e)),
        };

        if bytes.len() + read > bytes.capacity() {
            let mut grown = Zeroizing::new(Vec::with_capacity((bytes.len() + read) * 2));
            grown.extend_from_slice(&bytes);
            bytes = grown;
        }
        bytes.extend_from_slice(&chunk[..read]);
    }

    if bytes.ends_with(b"\n") {
        bytes.pop();
        if bytes.ends_with(b"\r") {
            bytes.pop();
        }
    }

    Ok(bytes)
}

/// Generate shell completions and exit.
fn generate_completions(shell_name: &str) {
    let shell = match shell_name.to_lowercase().as_str() {
        "bash" => Shell::Bash,
        "zsh" => Shell::Zsh,
        "fish" => Shell::Fish,
        "powershell" => Shell::PowerShell,
        "elvish" => Shell::Elvish,
        _ => {
            eprintln!(
                "Unknown shell: {shell_name}. Supported: bash, zsh, fish, powershell, elvish"
            );
            std::process::exit(2);
        }
    };

    clap_complete::generate(shell, &mut Cli::command(), "hashpass", &mut io::stdout());
}
