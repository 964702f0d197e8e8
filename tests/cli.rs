// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn romanesco() -> Command {
    Command::cargo_bin("romanesco").unwrap()
}

#[test]
fn lists_fractals() {
    romanesco()
        .arg("--list")
        .assert()
        .success()
        .stdout(predicate::str::contains("mandelbrot").and(predicate::str::contains("collatz")));
}

#[test]
fn describes_a_fractal() {
    romanesco()
        .args(&["--describe", "Julia"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Constants: 2"));
}

#[test]
fn writes_a_png() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("julia.png");
    romanesco()
        .args(&["-f", "julia", "-c", "-0.8", "-c", "0.156", "-s", "smooth-color"])
        .args(&["--size", "24x16", "--samples", "2", "-t", "3", "-i", "64"])
        .args(&["-x", "-0.1", "-y", "0.2", "-z", "1.5"])
        .arg("-o")
        .arg(&path)
        .assert()
        .success();
    let image = image::open(&path).unwrap().to_rgba8();
    assert_eq!(image.dimensions(), (24, 16));
}

#[test]
fn bad_constant_count_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("never.png");
    romanesco()
        .args(&["-f", "julia", "-c", "0.3", "--size", "4x4"])
        .arg("-o")
        .arg(&path)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("takes 2 constants"));
    assert!(!path.exists());
}

#[test]
fn unknown_scheme_fails() {
    romanesco()
        .args(&["-f", "burning-ship", "-s", "smooth-color", "--size", "4x4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no coloring scheme"));
}

#[test]
fn a_fractal_is_required() {
    romanesco().assert().failure();
}
