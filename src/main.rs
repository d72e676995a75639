//! WideInt CLI
//!
//! A command-line front end for the fixed-width integer and ECDH library.
//!
//! # Commands
//!
//! - `demo` - Run a full two-party key exchange and print the transcript
//! - `keygen` - Generate a random private scalar and its public key
//! - `public-key` - Derive the public key for a given scalar
//! - `shared-secret` - Combine a scalar with a peer's public key
//! - `calc` - Evaluate one 128- or 256-bit integer operation
//! - `benchmark` - Time scalar multiplications

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;

use wideint::arith::ecdh::{self, validate_private_scalar, validate_public_key};
use wideint::arith::params::p192;
use wideint::arith::{Limb, WideUint};
use wideint::config;
use wideint::keygen::{generate_keypair, random_scalar};
use wideint::{CurveParameters, Exchange, Point, U256};

/// Private scalars for the reference exchange on P-192
const DEMO_ALICE: &str = "1863057198451078255086943063078133078831752240818134503";
const DEMO_BOB: &str = "5684341886080801483496218260349564865441085341978530127";

#[derive(Parser)]
#[command(name = "wideint")]
#[command(author = "Cyberia")]
#[command(version = "0.2.0")]
#[command(about = "Fixed-width integer arithmetic and elliptic-curve Diffie-Hellman")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Named curve (p192, secp256k1)
    #[arg(long, global = true)]
    curve: Option<String>,

    /// JSON curve file (takes precedence over --curve)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a two-party key exchange and print the transcript
    Demo {
        /// Print the transcript as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate a random private scalar and its public key
    Keygen {
        /// Print the key pair as JSON
        #[arg(long)]
        json: bool,
    },

    /// Derive the public key for a private scalar
    PublicKey {
        /// Private scalar (decimal or 0x-prefixed hex)
        #[arg(long)]
        scalar: String,
    },

    /// Derive the shared secret from a private scalar and a peer's public key
    SharedSecret {
        /// Private scalar (decimal or 0x-prefixed hex)
        #[arg(long)]
        scalar: String,

        /// Peer public key x coordinate
        #[arg(long)]
        peer_x: String,

        /// Peer public key y coordinate
        #[arg(long)]
        peer_y: String,

        /// Reject out-of-range scalars and off-curve peer keys
        #[arg(long)]
        validate: bool,
    },

    /// Evaluate one integer operation: LHS OP RHS
    Calc {
        /// Integer width in bits (128 or 256)
        #[arg(short, long, default_value = "256")]
        width: u32,

        lhs: String,

        /// One of + - * / % & | ^ << >> pow
        op: String,

        rhs: String,
    },

    /// Run performance benchmark
    Benchmark {
        /// Number of scalar multiplications
        #[arg(short, long, default_value = "20")]
        count: u32,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let curve = cli.curve.as_deref();
    let file = cli.config.as_deref();

    let result = match cli.command {
        Commands::Demo { json } => cmd_demo(curve, file, json),
        Commands::Keygen { json } => cmd_keygen(curve, file, json),
        Commands::PublicKey { scalar } => cmd_public_key(curve, file, &scalar),
        Commands::SharedSecret {
            scalar,
            peer_x,
            peer_y,
            validate,
        } => cmd_shared_secret(curve, file, &scalar, &peer_x, &peer_y, validate),
        Commands::Calc {
            width,
            lhs,
            op,
            rhs,
        } => cmd_calc(width, &lhs, &op, &rhs),
        Commands::Benchmark { count } => cmd_benchmark(curve, file, count),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// `-v` count sets the default level; `RUST_LOG` overrides it.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn load_curve(
    name: Option<&str>,
    file: Option<&Path>,
) -> anyhow::Result<(String, CurveParameters)> {
    let (name, params) = config::resolve(name, file)?;
    log::info!("using curve '{}'", name);
    Ok((name, params))
}

fn parse_u256(what: &str, value: &str) -> anyhow::Result<U256> {
    value
        .trim()
        .parse()
        .with_context(|| format!("invalid {} '{}'", what, value))
}

#[derive(Serialize)]
struct PointJson {
    infinity: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    x: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    y: Option<String>,
}

impl From<&Point> for PointJson {
    fn from(point: &Point) -> Self {
        Self {
            infinity: point.is_infinity(),
            x: point.x().map(|x| x.to_decimal_string()),
            y: point.y().map(|y| y.to_decimal_string()),
        }
    }
}

#[derive(Serialize)]
struct DemoReport {
    curve: String,
    alice_public: PointJson,
    bob_public: PointJson,
    alice_secret: PointJson,
    bob_secret: PointJson,
    agreed: bool,
}

fn print_point(label: &str, point: &Point) {
    match point {
        Point::Infinity => println!("{}: (infinity)", label),
        Point::Finite { x, y } => {
            println!("{}:", label);
            println!("  x = {}", x);
            println!("  y = {}", y);
        }
    }
}

fn cmd_demo(
    curve: Option<&str>,
    file: Option<&Path>,
    json: bool,
) -> anyhow::Result<()> {
    let (name, params) = load_curve(curve, file)?;

    // The reference scalars only make sense on P-192; anything else gets
    // fresh random scalars.
    let (alice, bob) = if params == p192() {
        (parse_u256("scalar", DEMO_ALICE)?, parse_u256("scalar", DEMO_BOB)?)
    } else {
        (random_scalar(&params)?, random_scalar(&params)?)
    };

    let mut exchange = Exchange::new(params);
    let start = Instant::now();
    exchange.generate_keys(alice, bob)?;
    log::info!("phase {:?} after {:.2?}", exchange.phase(), start.elapsed());
    exchange.exchange_public_keys()?;
    log::info!("phase {:?}", exchange.phase());
    exchange.derive_secrets()?;
    log::info!("phase {:?} after {:.2?}", exchange.phase(), start.elapsed());
    let transcript = exchange.finish()?;

    if json {
        let report = DemoReport {
            curve: name,
            alice_public: (&transcript.alice_public).into(),
            bob_public: (&transcript.bob_public).into(),
            alice_secret: (&transcript.alice_secret).into(),
            bob_secret: (&transcript.bob_secret).into(),
            agreed: transcript.agreed(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Curve: {}", name);
        println!("Field: {}-bit prime", params.p().bits());
        println!();
        print_point("Alice public key", &transcript.alice_public);
        print_point("Bob public key", &transcript.bob_public);
        println!();
        print_point("Alice shared secret", &transcript.alice_secret);
        print_point("Bob shared secret", &transcript.bob_secret);
        println!();
    }

    if !transcript.agreed() {
        anyhow::bail!("Shared secrets differ");
    }
    if !json {
        println!("Shared secrets match.");
    }
    Ok(())
}

fn cmd_keygen(
    curve: Option<&str>,
    file: Option<&Path>,
    json: bool,
) -> anyhow::Result<()> {
    let (_, params) = load_curve(curve, file)?;
    let scalar = random_scalar(&params)?;
    let public = ecdh::public_key(&params, scalar);

    if json {
        #[derive(Serialize)]
        struct KeygenReport {
            private: String,
            public: PointJson,
        }
        let report = KeygenReport {
            private: scalar.to_hex_string(),
            public: (&public).into(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("WARNING: Keep the private scalar secret!");
        println!("Private scalar: {}", scalar.to_hex_string());
        print_point("Public key", &public);
    }
    Ok(())
}

fn cmd_public_key(
    curve: Option<&str>,
    file: Option<&Path>,
    scalar: &str,
) -> anyhow::Result<()> {
    let (_, params) = load_curve(curve, file)?;
    let scalar = parse_u256("scalar", scalar)?;
    print_point("Public key", &ecdh::public_key(&params, scalar));
    Ok(())
}

fn cmd_shared_secret(
    curve: Option<&str>,
    file: Option<&Path>,
    scalar: &str,
    peer_x: &str,
    peer_y: &str,
    validate: bool,
) -> anyhow::Result<()> {
    let (_, params) = load_curve(curve, file)?;
    let scalar = parse_u256("scalar", scalar)?;
    let peer = Point::new(parse_u256("peer x", peer_x)?, parse_u256("peer y", peer_y)?);

    if validate {
        validate_private_scalar(&params, scalar).context("private scalar rejected")?;
        validate_public_key(&params, &peer).context("peer public key rejected")?;
    }

    print_point("Shared secret", &ecdh::shared_secret(&params, scalar, peer));
    Ok(())
}

fn cmd_calc(width: u32, lhs: &str, op: &str, rhs: &str) -> anyhow::Result<()> {
    match width {
        128 => print_result(evaluate::<u64>(lhs, op, rhs)?),
        256 => print_result(evaluate::<wideint::U128>(lhs, op, rhs)?),
        other => anyhow::bail!("Unsupported width {} (expected 128 or 256)", other),
    }
    Ok(())
}

fn print_result<L: Limb>(value: WideUint<L>) {
    println!("{}", value);
    println!("{:#x}", value);
}

fn evaluate<L: Limb>(lhs: &str, op: &str, rhs: &str) -> anyhow::Result<WideUint<L>> {
    let a: WideUint<L> = lhs
        .trim()
        .parse()
        .with_context(|| format!("invalid left operand '{}'", lhs))?;

    // Shift amounts and exponents are plain u32
    let small = || -> anyhow::Result<u32> {
        rhs.trim()
            .parse()
            .with_context(|| format!("'{}' needs a u32 right operand, got '{}'", op, rhs))
    };
    let wide = || -> anyhow::Result<WideUint<L>> {
        rhs.trim()
            .parse()
            .with_context(|| format!("invalid right operand '{}'", rhs))
    };

    let value = match op {
        "+" => a + wide()?,
        "-" => a - wide()?,
        "*" | "x" => a * wide()?,
        "/" => a.checked_div_rem(wide()?)?.0,
        "%" => a.checked_div_rem(wide()?)?.1,
        "&" => a & wide()?,
        "|" => a | wide()?,
        "^" => a ^ wide()?,
        "<<" => a << small()?,
        ">>" => a >> small()?,
        "pow" | "**" => a.wrapping_pow(small()?),
        other => anyhow::bail!("Unknown operator '{}'", other),
    };
    Ok(value)
}

fn cmd_benchmark(
    curve: Option<&str>,
    file: Option<&Path>,
    count: u32,
) -> anyhow::Result<()> {
    let (name, params) = load_curve(curve, file)?;
    println!(
        "Running benchmark with {} scalar multiplications on {}...",
        count, name
    );

    let keypair = generate_keypair(&params)?;
    let scalar = random_scalar(&params)?;

    let start = Instant::now();
    for _ in 0..count {
        let _ = ecdh::public_key(&params, scalar);
    }
    let keygen_elapsed = start.elapsed();

    let start = Instant::now();
    let _ = Exchange::run(params, scalar, random_scalar(&params)?)?;
    let exchange_elapsed = start.elapsed();

    let rate = count as f64 / keygen_elapsed.as_secs_f64();

    println!("\nResults:");
    println!("  Scalar multiplications: {}", count);
    println!("  Time elapsed: {:.2}s", keygen_elapsed.as_secs_f64());
    println!("  Rate: {:.2} ops/s", rate);
    println!("  Full exchange: {:.2}ms", exchange_elapsed.as_secs_f64() * 1000.0);

    println!("\nCurve parameters:");
    println!("  Field size: {} bits", params.p().bits());
    match params.order {
        Some(n) => println!("  Generator order: {} bits", n.bits()),
        None => println!("  Generator order: unknown"),
    }
    println!(
        "  Sample public key on curve: {}",
        params.curve.is_on_curve(&keypair.public_key())
    );

    Ok(())
}
