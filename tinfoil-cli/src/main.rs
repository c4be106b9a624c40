//! Thin command-line front end over `tinfoildb::Store`.
//!
//! Each invocation opens the database, performs exactly one operation, and exits; there
//! is no long-lived session. This binary is a convenience wrapper, not part of the
//! storage engine itself — all the interesting logic lives in `tinfoildb` and
//! `tinfoilcrypto`.

use clap::{Parser, Subcommand};
use directories::ProjectDirs;
use std::path::PathBuf;
use std::process::ExitCode;
use tinfoildb::{Store, StoreError, DEFAULT_AES_KEY_SIZE, DEFAULT_HMAC_KEY_SIZE, DEFAULT_SCRYPT_P, DEFAULT_SCRYPT_R};
use tinfoilcrypto::ScryptParams;

#[derive(Parser)]
#[command(name = "tinfoil", version, about = "Password-based encrypted key-value store")]
struct Cli {
	/// Path to the database file. Defaults to a per-user data directory.
	#[arg(long, global = true)]
	db: Option<PathBuf>,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Create a new database and set its master password.
	Init {
		/// log2(N) for the Scrypt cost parameter. The database stores the literal N.
		#[arg(long, default_value_t = 19)]
		scrypt_log_n: u8,
		#[arg(long, default_value_t = DEFAULT_SCRYPT_R)]
		scrypt_r: u32,
		#[arg(long, default_value_t = DEFAULT_SCRYPT_P)]
		scrypt_p: u32,
	},
	/// Store a value under a key. Fails if the key already exists.
	Put { key: String, value: String },
	/// Print the value stored under a key.
	Get { key: String },
	/// Print whether a key exists, without unlocking the database.
	Has { key: String },
	/// Remove a key, without unlocking the database.
	Delete { key: String },
}

fn main() -> ExitCode {
	let cli = Cli::parse();
	let db_path = match cli.db.or_else(default_db_path) {
		Some(path) => path,
		None => {
			eprintln!("tinfoil: could not determine a default database path; pass --db");
			return ExitCode::FAILURE;
		}
	};

	match run(&db_path, cli.command) {
		Ok(()) => ExitCode::SUCCESS,
		Err(message) => {
			eprintln!("tinfoil: {message}");
			ExitCode::FAILURE
		}
	}
}

fn default_db_path() -> Option<PathBuf> {
	let dirs = ProjectDirs::from("io", "tinfoil", "tinfoil")?;
	Some(dirs.data_dir().join("tinfoil.db"))
}

fn run(db_path: &PathBuf, command: Command) -> Result<(), String> {
	if let Some(parent) = db_path.parent() {
		std::fs::create_dir_all(parent).map_err(|e| format!("could not create {}: {e}", parent.display()))?;
	}

	let mut store = Store::open(db_path).map_err(describe)?;

	match command {
		Command::Init { scrypt_log_n, scrypt_r, scrypt_p } => {
			if store.is_initialized().map_err(describe)? {
				return Err(format!("{} is already initialized", db_path.display()));
			}

			let n = 1u64.checked_shl(scrypt_log_n as u32).ok_or_else(|| "scrypt-log-n is too large".to_string())?;
			let kdf = ScryptParams::new(n, scrypt_r, scrypt_p).map_err(|e| e.to_string())?;

			let password = prompt_new_password()?;
			store.initialize(&password, kdf, DEFAULT_AES_KEY_SIZE, DEFAULT_HMAC_KEY_SIZE).map_err(describe)?;
			println!("initialized {}", db_path.display());
			Ok(())
		}
		Command::Put { key, value } => {
			unlock(&mut store)?;
			if !store.put(&key, &value).map_err(describe)? {
				return Err(format!("key {key:?} already exists"));
			}
			Ok(())
		}
		Command::Get { key } => {
			unlock(&mut store)?;
			match store.get(&key).map_err(describe)? {
				Some(value) => {
					println!("{value}");
					Ok(())
				}
				None => Err(format!("no such key: {key:?}")),
			}
		}
		Command::Has { key } => {
			let exists = store.has(&key).map_err(describe)?;
			println!("{exists}");
			Ok(())
		}
		Command::Delete { key } => {
			store.delete(&key).map_err(describe)?;
			Ok(())
		}
	}
}

fn unlock(store: &mut Store) -> Result<(), String> {
	if !store.is_initialized().map_err(describe)? {
		return Err("database is not initialized; run `init` first".to_string());
	}

	let password = rpassword::prompt_password("Master password: ").map_err(|e| format!("could not read password: {e}"))?;
	if !store.unlock(&password).map_err(describe)? {
		return Err("wrong password".to_string());
	}

	Ok(())
}

fn prompt_new_password() -> Result<String, String> {
	let password = rpassword::prompt_password("New master password: ").map_err(|e| format!("could not read password: {e}"))?;
	let confirm = rpassword::prompt_password("Confirm master password: ").map_err(|e| format!("could not read password: {e}"))?;

	if password != confirm {
		return Err("passwords did not match".to_string());
	}

	Ok(password)
}

fn describe(error: StoreError) -> String {
	match error {
		StoreError::Tampered => "database entry failed authentication; the file may be corrupted or tampered with".to_string(),
		other => other.to_string(),
	}
}
