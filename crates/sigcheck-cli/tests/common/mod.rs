#![allow(dead_code)]

//! Helpers for running the `sigcheck` binary in an isolated environment.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::thread;

use assert_cmd::Command;
use tempfile::TempDir;

/// Binary command with XDG dirs redirected into `home`, so logs and config
/// never touch the real user directories.
pub fn sigcheck(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("sigcheck").unwrap();
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_STATE_HOME", home.join("state"))
        .env_remove("RUST_LOG");
    cmd
}

pub fn write_lock(dir: &TempDir, json: &str) -> PathBuf {
    let path = dir.path().join("lock.json");
    std::fs::write(&path, json).unwrap();
    path
}

/// Serves `body` with 200 for any path. Returns the base URL.
pub fn serve(body: &'static [u8]) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    thread::spawn(move || {
        for mut stream in listener.incoming().flatten() {
            thread::spawn(move || {
                let mut buf = [0u8; 4096];
                if stream.read(&mut buf).unwrap_or(0) == 0 {
                    return;
                }
                let header = format!(
                    "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    body.len()
                );
                let _ = stream.write_all(header.as_bytes());
                let _ = stream.write_all(body);
            });
        }
    });
    format!("http://127.0.0.1:{}/", port)
}

/// Executable script standing in for gpg that prints `listing`.
#[cfg(unix)]
pub fn fake_gpg(dir: &Path, listing: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-gpg");
    std::fs::write(&path, format!("#!/bin/sh\ncat <<'LISTING'\n{listing}\nLISTING\n")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}
