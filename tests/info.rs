use assert_cmd::Command;
use libflate::gzip::Encoder;
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::{tempdir, TempDir};

static SAMPLE_PAGE: &str = "This is sample.info, produced by makeinfo.

\x1f
File: sample.info,  Node: Top,  Next: Usage,  Up: (dir)

Sample
******

A sample manual.

* Menu:

* Usage::            Running the sample.
* Copying::          License.



\x1f
File: sample.info,  Node: Usage,  Next: Copying,  Prev: Top,  Up: Top

1 Usage
*******

Run it.
\x1f
File: sample.info,  Node: Copying,  Prev: Usage,  Up: Top

2 Copying
*********

Permission is granted to copy, distribute and/or modify this document.
\x1f
Tag Table:
Node: Top\x7f70
Node: Usage\x7f300
\x1f
End Tag Table
";

static SAMPLE_TEXT: &str = "This is sample.info, produced by makeinfo.

Sample
******

A sample manual.

1 Usage
*******

Run it.
";

fn gzip(data: &str) -> Vec<u8> {
    let mut encoder = Encoder::new(Vec::new()).expect("gzip encoder");
    encoder.write_all(data.as_bytes()).expect("compressed");
    encoder.finish().into_result().expect("finished gzip")
}

fn info_dir(pages: &[(&str, &[u8])]) -> TempDir {
    let dir = tempdir().expect("temp dir");
    for &(name, data) in pages {
        fs::write(dir.path().join(name), data).expect("wrote page");
    }
    dir
}

fn info(infopath: &Path) -> Command {
    let mut cmd = Command::cargo_bin("info").expect("found binary");
    cmd.env("INFOPATH", infopath).env_remove("INFO_LOG");
    cmd
}

#[test]
fn no_args() {
    Command::cargo_bin("info")
        .expect("found binary")
        .assert()
        .code(1)
        .stderr(predicate::str::similar("info: which page?\n"))
        .stdout(predicate::str::is_empty());
}

#[test]
fn help() {
    Command::cargo_bin("info")
        .expect("found binary")
        .arg("--help")
        .assert()
        .success()
        .stderr(predicate::str::is_empty())
        .stdout(predicate::str::contains("SYNOPSIS"));
}

#[test]
fn missing_page() {
    let dir = info_dir(&[]);
    info(dir.path())
        .arg("nosuch")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no page for \"nosuch\""))
        .stdout(predicate::str::is_empty());
}

#[test]
fn plain_page() {
    let dir = info_dir(&[("sample.info", SAMPLE_PAGE.as_bytes())]);
    info(dir.path())
        .arg("sample")
        .assert()
        .success()
        .stderr(predicate::str::is_empty())
        .stdout(predicate::str::similar(format!("{}\n", SAMPLE_TEXT)));
}

#[test]
fn compressed_page() {
    let dir = info_dir(&[("sample.info.gz", &gzip(SAMPLE_PAGE)[..])]);
    info(dir.path())
        .arg("sample")
        .assert()
        .success()
        .stdout(predicate::str::similar(format!("{}\n", SAMPLE_TEXT)));
}

#[test]
fn searches_every_directory() {
    let empty = info_dir(&[]);
    let full = info_dir(&[("sample.info", SAMPLE_PAGE.as_bytes())]);
    let infopath = format!("{}:{}", empty.path().display(), full.path().display());

    Command::cargo_bin("info")
        .expect("found binary")
        .env("INFOPATH", infopath)
        .arg("sample")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("This is sample.info"));
}

#[test]
fn split_manual() {
    let main = "This is split.info, produced by makeinfo.\n\n\x1f\nIndirect:\nsplit.info-1: 100\nsplit.info-2: 2000\n\x1f\nTag Table:\n(Indirect)\nNode: Top\x7f100\n\x1f\nEnd Tag Table\n";
    let part1 = "\x1f\nFile: split.info,  Node: Top,  Next: More,  Up: (dir)\n\nPart one.\n";
    let part2 = "\x1f\nFile: split.info,  Node: More,  Prev: Top,  Up: Top\n\nPart two.\n";
    let dir = info_dir(&[
        ("split.info.gz", &gzip(main)[..]),
        ("split.info-1.gz", &gzip(part1)[..]),
        ("split.info-2", part2.as_bytes()),
    ]);

    info(dir.path())
        .arg("split")
        .assert()
        .success()
        .stderr(predicate::str::is_empty())
        .stdout(predicate::str::similar(
            "This is split.info, produced by makeinfo.\n\nPart one.\n\nPart two.\n\n",
        ));
}

#[test]
fn missing_part_of_split_manual() {
    let main = "\x1f\nIndirect:\nsplit.info-1: 100\n\x1f\nTop\n";
    let dir = info_dir(&[("split.info", main.as_bytes())]);

    info(dir.path())
        .arg("split")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("could not find included page \"split.info-1\""))
        .stdout(predicate::str::is_empty());
}

#[test]
fn corrupt_compressed_page() {
    let dir = info_dir(&[("broken.info.gz", &b"not gzip at all"[..])]);
    info(dir.path())
        .arg("broken")
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("info: "))
        .stdout(predicate::str::is_empty());
}

#[test]
fn latin1_page_passes_through() {
    let page = b"\x1f\nFile: cafe.info,  Node: Top\n\nCaf\xe9 cr\xe8me\n";
    let dir = info_dir(&[("cafe.info", &page[..])]);

    let assert = info(dir.path()).arg("cafe").assert().success();
    assert_eq!(assert.get_output().stdout, b"Caf\xe9 cr\xe8me\n\n".to_vec());
}
