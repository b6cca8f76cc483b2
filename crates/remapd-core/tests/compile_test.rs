// Remapd Config Compilation Tests
//
// End-to-end coverage of loading a config file from disk, include
// expansion, and best-effort compilation of partially invalid input.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use remapd_core::config::{loader, MAX_FILE_SZ};
use remapd_core::{Config, Descriptor, Key};

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    let mut f = File::create(&path).unwrap();
    f.write_all(content.as_bytes()).unwrap();
    path
}

fn keyseq(code: u8) -> Descriptor {
    Descriptor::KeySequence {
        key: Key::from(code),
        mods: 0,
    }
}

#[test]
fn compile_from_file_with_include() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "nav", "[nav]\nj = down\nk = up\n");
    let root = write_file(
        dir.path(),
        "keyboard.conf",
        "include nav\n[main]\ncapslock = layer(nav)\n",
    );

    let config = Config::from_path(&root).unwrap();

    let nav_idx = config.layer_index("nav").unwrap();
    let main = config.layer(0).unwrap();
    assert_eq!(*main.keymap().get(Key::from(58)), Descriptor::Layer(nav_idx));

    let nav = config.layer(nav_idx).unwrap();
    assert_eq!(*nav.keymap().get(Key::from(36)), keyseq(108)); // j -> down
    assert_eq!(*nav.keymap().get(Key::from(37)), keyseq(103)); // k -> up
}

#[test]
fn unsafe_include_is_skipped_rest_compiles() {
    let dir = tempfile::tempdir().unwrap();
    let root = write_file(
        dir.path(),
        "keyboard.conf",
        "include ../../etc/passwd\n[main]\na = b\n",
    );

    let config = Config::from_path(&root).unwrap();
    assert_eq!(*config.layer(0).unwrap().keymap().get(Key::from(30)), keyseq(48));
}

#[test]
fn oversized_file_yields_no_config() {
    let dir = tempfile::tempdir().unwrap();
    let line = format!("# {}\n", "x".repeat(100));
    let root = write_file(
        dir.path(),
        "keyboard.conf",
        &line.repeat(MAX_FILE_SZ / line.len() + 1),
    );

    assert!(Config::from_path(&root).is_err());
}

#[test]
fn overlong_line_yields_no_config() {
    let dir = tempfile::tempdir().unwrap();
    let root = write_file(
        dir.path(),
        "keyboard.conf",
        &format!("[main]\n# {}\n", "x".repeat(loader::MAX_LINE_LEN)),
    );

    assert!(Config::from_path(&root).is_err());
}

#[test]
fn alias_descriptor_lands_on_every_aliased_key() {
    let dir = tempfile::tempdir().unwrap();
    let root = write_file(
        dir.path(),
        "keyboard.conf",
        "[aliases]\nq = hyper\nw = hyper\n\n[main]\nhyper = x\n",
    );

    let config = Config::from_path(&root).unwrap();
    let main = config.layer(0).unwrap();
    assert_eq!(*main.keymap().get(Key::from(16)), keyseq(45));
    assert_eq!(*main.keymap().get(Key::from(17)), keyseq(45));
}

#[test]
fn compiling_twice_yields_identical_configs() {
    let dir = tempfile::tempdir().unwrap();
    let root = write_file(
        dir.path(),
        "keyboard.conf",
        "[global]\nmacro_timeout = 300\n\n[aliases]\ncapslock = esc\n\n[main]\na = layer(shift)\n\n[nav]\nj = down\n",
    );

    let first = Config::from_path(&root).unwrap();
    let second = Config::from_path(&root).unwrap();
    assert_eq!(first, second);
}

#[test]
fn invalid_global_does_not_stop_later_sections() {
    let dir = tempfile::tempdir().unwrap();
    let root = write_file(
        dir.path(),
        "keyboard.conf",
        "[global]\nfoo = 1\n\n[nav]\nj = down\n",
    );

    let config = Config::from_path(&root).unwrap();
    assert_eq!(config.globals().macro_timeout, 600);
    let nav = config.layer(config.layer_index("nav").unwrap()).unwrap();
    assert_eq!(*nav.keymap().get(Key::from(36)), keyseq(108));
}
