use assert_cmd::Command;
use hashpass_lib::verify_password;
use predicates::prelude::*;

/// Helper to get the hashpass binary command
fn hashpass_cmd() -> Command {
    Command::cargo_bin("hashpass").unwrap()
}

/// Runs hashpass and returns stdout as a string.
fn stdout_of(args: &[&str]) -> String {
    let output = hashpass_cmd().args(args).output().expect("Failed to execute");
    assert!(output.status.success(), "hashpass {args:?} failed");
    String::from_utf8(output.stdout).unwrap()
}

mod default_invocation {
    use super::*;

    #[test]
    fn prints_label_and_bcrypt_hash() {
        hashpass_cmd()
            .assert()
            .success()
            .stdout(
                predicate::str::is_match(r"^Hashed Password: \n\$2b\$12\$[./A-Za-z0-9]{53}\n$")
                    .unwrap(),
            );
    }

    #[test]
    fn prints_exactly_two_lines() {
        let stdout = stdout_of(&[]);
        assert_eq!(stdout.lines().count(), 2);
    }

    #[test]
    fn hash_verifies_against_admin123() {
        let stdout = stdout_of(&[]);
        let hash = stdout.lines().nth(1).unwrap();
        assert!(verify_password("Admin123", hash).unwrap());
        assert!(!verify_password("admin123", hash).unwrap());
    }

    #[test]
    fn repeated_runs_use_fresh_salts() {
        let first = stdout_of(&[]);
        let second = stdout_of(&[]);
        assert_ne!(first, second);
    }
}

mod bcrypt_mode {
    use super::*;

    #[test]
    fn positional_plaintext_is_hashed() {
        let stdout = stdout_of(&["--cost", "4", "correct horse"]);
        let hash = stdout.lines().nth(1).unwrap();
        assert!(hash.starts_with("$2b$04$"));
        assert!(verify_password("correct horse", hash).unwrap());
    }

    #[test]
    fn cost_below_range_is_rejected() {
        hashpass_cmd()
            .args(["--cost", "3", "secret"])
            .assert()
            .code(2)
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("invalid configuration"));
    }

    #[test]
    fn cost_above_range_is_rejected() {
        hashpass_cmd()
            .args(["-c", "32", "secret"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("4..=31"));
    }

    #[test]
    fn overlong_plaintext_is_rejected() {
        let long = "x".repeat(73);
        hashpass_cmd()
            .args(["--cost", "4", long.as_str()])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("at most 72"));
    }

    #[test]
    fn quiet_prints_only_the_hash() {
        hashpass_cmd()
            .args(["--quiet", "--cost", "4", "secret"])
            .assert()
            .success()
            .stdout(predicate::str::is_match(r"^\$2b\$04\$[./A-Za-z0-9]{53}\n$").unwrap());
    }
}

mod argon2id_mode {
    use super::*;

    #[test]
    fn scheme_flag_produces_phc_string() {
        let stdout = stdout_of(&[
            "--scheme",
            "argon2id",
            "--memory-cost",
            "4096",
            "--time-cost",
            "1",
            "secret",
        ]);
        let hash = stdout.lines().nth(1).unwrap();
        assert!(hash.starts_with("$argon2id$v=19$m=4096,t=1,p=1$"));
        assert!(verify_password("secret", hash).unwrap());
    }

    #[test]
    fn zero_parallelism_is_rejected() {
        hashpass_cmd()
            .args(["-s", "argon2id", "--parallelism", "0", "secret"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("argon2id parameters"));
    }

    #[test]
    fn oversized_memory_cost_is_rejected() {
        hashpass_cmd()
            .args(["-s", "argon2id", "--memory-cost", "4294967295", "secret"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("exceeds"));
    }

    #[test]
    fn unknown_scheme_is_a_usage_error() {
        hashpass_cmd()
            .args(["--scheme", "md5", "secret"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid value"));
    }
}

mod stdin_mode {
    use super::*;

    #[test]
    fn dash_reads_plaintext_and_strips_newline() {
        let output = hashpass_cmd()
            .args(["--quiet", "--cost", "4", "-"])
            .write_stdin("piped secret\n")
            .output()
            .expect("Failed to execute");
        assert!(output.status.success());

        let hash = String::from_utf8(output.stdout).unwrap();
        assert!(verify_password("piped secret", hash.trim_end()).unwrap());
        assert!(!verify_password("piped secret\n", hash.trim_end()).unwrap());
    }

    #[test]
    fn empty_stdin_hashes_empty_plaintext() {
        let output = hashpass_cmd()
            .args(["-q", "-c", "4", "-"])
            .write_stdin("")
            .output()
            .expect("Failed to execute");
        assert!(output.status.success());

        let hash = String::from_utf8(output.stdout).unwrap();
        assert!(verify_password("", hash.trim_end()).unwrap());
    }

    #[test]
    fn long_stdin_is_read_in_full() {
        let secret = "0123456789".repeat(1000);
        let output = hashpass_cmd()
            .args(["-q", "-s", "argon2id", "--memory-cost", "4096", "--time-cost", "1", "-"])
            .write_stdin(format!("{secret}\n"))
            .output()
            .expect("Failed to execute");
        assert!(output.status.success());

        let hash = String::from_utf8(output.stdout).unwrap();
        assert!(verify_password(&secret, hash.trim_end()).unwrap());
        assert!(!verify_password(&secret[..9999], hash.trim_end()).unwrap());
    }

    #[test]
    fn invalid_utf8_stdin_is_an_encoding_error() {
        hashpass_cmd()
            .arg("-")
            .write_stdin(vec![0x66u8, 0xff, 0x6f])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("not valid UTF-8"));
    }
}

#[cfg(unix)]
mod os_string_input {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    use super::*;

    #[test]
    fn invalid_utf8_argument_is_an_encoding_error() {
        hashpass_cmd()
            .arg(OsString::from_vec(vec![0x61, 0x80, 0x62]))
            .assert()
            .code(2)
            .stderr(predicate::str::contains("plaintext encoding error"));
    }
}

mod verify_mode {
    use super::*;

    #[test]
    fn matching_plaintext_exits_zero() {
        let hash = stdout_of(&["-q", "-c", "4", "letmein"]);
        hashpass_cmd()
            .args(["--verify", hash.trim_end(), "letmein"])
            .assert()
            .success()
            .stdout("Password Verified: \ntrue\n");
    }

    #[test]
    fn mismatching_plaintext_exits_one() {
        let hash = stdout_of(&["-q", "-c", "4", "letmein"]);
        hashpass_cmd()
            .args(["--verify", hash.trim_end(), "letmeout"])
            .assert()
            .code(1)
            .stdout("Password Verified: \nfalse\n");
    }

    #[test]
    fn default_plaintext_is_verified_when_omitted() {
        let hash = stdout_of(&["-q", "-c", "4"]);
        hashpass_cmd()
            .args(["--quiet", "--verify", hash.trim_end()])
            .assert()
            .success()
            .stdout("true\n");
    }

    #[test]
    fn malformed_hash_exits_two() {
        hashpass_cmd()
            .args(["--verify", "not-a-valid-hash", "secret"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("invalid password hash format"));
    }

    #[test]
    fn oversized_argon2_memory_in_hash_exits_two() {
        hashpass_cmd()
            .args([
                "--verify",
                "$argon2id$v=19$m=4294967295,t=1,p=1$c2FsdHNhbHQ$aGFzaGhhc2hoYXNoaGFzaA",
                "x",
            ])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("invalid password hash format"));
    }

    #[test]
    fn verify_conflicts_with_cost() {
        hashpass_cmd()
            .args(["--verify", "$2b$04$x", "--cost", "4", "secret"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("cannot be used with"));
    }
}

mod shell_completions {
    use super::*;

    #[test]
    fn bash_completions() {
        hashpass_cmd()
            .env("COMPLETE", "bash")
            .assert()
            .success()
            .stdout(predicate::str::contains("_hashpass()"));
    }

    #[test]
    fn zsh_completions() {
        hashpass_cmd()
            .env("COMPLETE", "zsh")
            .assert()
            .success()
            .stdout(predicate::str::contains("#compdef hashpass"));
    }

    #[test]
    fn invalid_shell_error() {
        hashpass_cmd()
            .env("COMPLETE", "invalid")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown shell"));
    }
}

mod logging {
    use super::*;

    #[test]
    fn rust_log_writes_to_stderr_only() {
        hashpass_cmd()
            .env("RUST_LOG", "debug")
            .args(["--cost", "4", "secret"])
            .assert()
            .success()
            .stdout(predicate::str::is_match(r"^Hashed Password: \n\$2b\$04\$\S{53}\n$").unwrap())
            .stderr(predicate::str::contains("hashed password"))
            .stderr(predicate::str::contains("secret\n").not());
    }
}

mod help_and_version {
    use super::*;

    #[test]
    fn help_flag() {
        hashpass_cmd()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Hash a password with bcrypt or Argon2id"))
            .stdout(predicate::str::contains("COMPLETE=bash"));
    }

    #[test]
    fn version_flag() {
        hashpass_cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("hashpass"));
    }
}
