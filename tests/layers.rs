//! Layer isolation, overlay precedence, and the full relink sequence.

mod common;

use common::TestContext;

#[test]
fn unlinking_one_layer_leaves_the_other_intact() {
    let ctx = TestContext::new();
    ctx.add_layer_file("common", ".bashrc", "base\n");
    ctx.add_layer_file("macos", ".hammerspoon/init.lua", "overlay\n");
    let manager = ctx.manager();
    manager.create_symlinks(&ctx.layer_dir("common"), "common");
    manager.create_symlinks(&ctx.layer_dir("macos"), "macos");

    let removed = manager.remove_symlinks(&ctx.layer_dir("macos"), "macos");

    assert_eq!(removed, 1);
    assert!(!ctx.is_symlink(".hammerspoon/init.lua"));
    assert!(ctx.is_symlink(".bashrc"), "common layer must survive");
}

#[test]
fn overlay_overwrites_base_layer_entry() {
    let ctx = TestContext::new();
    ctx.add_layer_file("common", ".profile", "base\n");
    let overlay = ctx.add_layer_file("macos", ".profile", "overlay\n");
    let manager = ctx.manager();

    manager.create_symlinks(&ctx.layer_dir("common"), "common");
    manager.create_symlinks(&ctx.layer_dir("macos"), "macos");

    assert_eq!(ctx.resolved_target(".profile"), overlay);
    assert_eq!(
        std::fs::read_to_string(ctx.target_path(".profile")).unwrap(),
        "overlay\n"
    );
}

#[test]
fn foreign_symlinks_in_target_are_not_removed() {
    let ctx = TestContext::new();
    ctx.add_layer_file("common", ".bashrc", "x\n");
    let elsewhere = tempfile::tempdir().unwrap();
    let foreign_target = elsewhere.path().join("theirs");
    std::fs::write(&foreign_target, "y\n").unwrap();
    common::raw_symlink(&foreign_target, &ctx.target_path(".theirs"));

    let manager = ctx.manager();
    manager.create_symlinks(&ctx.layer_dir("common"), "common");
    let removed = manager.remove_symlinks(&ctx.layer_dir("common"), "common");

    assert_eq!(removed, 1);
    assert!(ctx.is_symlink(".theirs"), "links owned by the user stay put");
}

#[test]
fn relink_rebuilds_both_layers_and_cleans_breakage() {
    let ctx = TestContext::new();
    ctx.add_layer_file("common", ".bashrc", "base\n");
    ctx.add_layer_file("macos", ".config/karabiner/karabiner.json", "{}\n");
    ctx.add_app("macos", "osx-helper");
    let manager = ctx.manager();

    // Seed a stale state: an old link whose source no longer exists.
    let gone = ctx.add_layer_file("common", ".config/old/rc", "old\n");
    manager.create_symlinks(&ctx.layer_dir("common"), "common");
    std::fs::remove_file(&gone).unwrap();

    manager.relink("macos");

    assert!(ctx.is_symlink(".bashrc"));
    assert!(ctx.is_symlink(".config/karabiner/karabiner.json"));
    assert!(ctx.is_symlink(".local/bin/osx-helper"));
    assert!(!ctx.target_path(".config/old").exists(), "stale state cleaned");
}

#[test]
fn show_counts_only_links_under_the_filter() {
    let ctx = TestContext::new();
    ctx.add_layer_file("common", ".bashrc", "x\n");
    ctx.add_layer_file("common", ".config/app/rc", "y\n");
    ctx.add_layer_file("macos", ".macosrc", "z\n");
    let manager = ctx.manager();
    manager.create_symlinks(&ctx.layer_dir("common"), "common");
    manager.create_symlinks(&ctx.layer_dir("macos"), "macos");

    assert_eq!(
        manager.show_symlinks(Some(&ctx.layer_dir("common")), "common"),
        2
    );
    assert_eq!(
        manager.show_symlinks(Some(&ctx.layer_dir("macos")), "macos"),
        1
    );
    assert_eq!(manager.show_symlinks(None, "all layers"), 3);
}

#[test]
fn show_flags_broken_links_but_still_counts_them() {
    let ctx = TestContext::new();
    let source = ctx.add_layer_file("common", ".bashrc", "x\n");
    let manager = ctx.manager();
    manager.create_symlinks(&ctx.layer_dir("common"), "common");
    std::fs::remove_file(&source).unwrap();

    assert_eq!(manager.show_symlinks(None, "all layers"), 1);
}
