use super::model::make_display;
use super::scan::{find_cover, find_sidecar, is_audio_file};
use super::*;
use crate::config::LibrarySettings;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn exts(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn make_display_prefers_artist_dash_title() {
    assert_eq!(make_display("Song", Some("Artist")), "Artist - Song");
    assert_eq!(make_display("Song", Some("  Artist  ")), "Artist - Song");
    assert_eq!(make_display("Song", None), "Song");
    assert_eq!(make_display("Song", Some("   ")), "Song");
}

#[test]
fn is_audio_file_matches_extensions_case_insensitive() {
    let e = exts(&["mp3", "flac"]);
    assert!(is_audio_file(Path::new("/tmp/a.mp3"), &e));
    assert!(is_audio_file(Path::new("/tmp/a.MP3"), &e));
    assert!(is_audio_file(Path::new("/tmp/a.flac"), &e));
    assert!(!is_audio_file(Path::new("/tmp/a.lrc"), &e));
    assert!(!is_audio_file(Path::new("/tmp/a"), &e));
}

#[test]
fn sidecar_lookup_tries_lower_and_upper_case() {
    let dir = tempdir().unwrap();
    let track = dir.path().join("song.mp3");
    fs::write(&track, b"x").unwrap();
    assert_eq!(find_sidecar(&track, &exts(&["lrc"])), None);

    fs::write(dir.path().join("song.LRC"), b"[00:01]a").unwrap();
    assert_eq!(
        find_sidecar(&track, &exts(&["lrc"])),
        Some(dir.path().join("song.LRC"))
    );

    fs::write(dir.path().join("song.lrc"), b"[00:01]a").unwrap();
    assert_eq!(
        find_sidecar(&track, &exts(&["lrc"])),
        Some(dir.path().join("song.lrc"))
    );
}

#[test]
fn cover_lookup_follows_configured_order() {
    let dir = tempdir().unwrap();
    let names = exts(&["cover.jpg", "folder.jpg"]);
    assert_eq!(find_cover(dir.path(), &names), None);

    fs::write(dir.path().join("folder.jpg"), b"img").unwrap();
    assert_eq!(find_cover(dir.path(), &names), Some(dir.path().join("folder.jpg")));

    fs::write(dir.path().join("cover.jpg"), b"img").unwrap();
    assert_eq!(find_cover(dir.path(), &names), Some(dir.path().join("cover.jpg")));
}

#[test]
fn scan_pairs_tracks_with_lyrics_and_sorts() {
    let dir = tempdir().unwrap();

    fs::write(dir.path().join("b.MP3"), b"not a real mp3").unwrap();
    fs::write(dir.path().join("A.ogg"), b"not a real ogg").unwrap();
    fs::write(dir.path().join("A.lrc"), b"[00:01.00]hello").unwrap();
    fs::write(dir.path().join("c.txt"), b"ignore me").unwrap();
    fs::write(dir.path().join("cover.png"), b"img").unwrap();

    let tracks = scan(dir.path(), &LibrarySettings::default());
    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].title, "A");
    assert_eq!(tracks[0].lyrics, Some(dir.path().join("A.lrc")));
    assert_eq!(tracks[1].title, "b");
    assert_eq!(tracks[1].lyrics, None);
    assert!(tracks.iter().all(|t| t.cover == Some(dir.path().join("cover.png"))));
}

#[test]
fn scan_respects_include_hidden_false() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(".hidden.mp3"), b"not real").unwrap();
    fs::write(dir.path().join("visible.mp3"), b"not real").unwrap();

    let settings = LibrarySettings {
        include_hidden: false,
        ..LibrarySettings::default()
    };
    let tracks = scan(dir.path(), &settings);

    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].display, "visible");
}

#[test]
fn scan_respects_recursive_false() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("root.mp3"), b"not real").unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir_all(&sub).unwrap();
    fs::write(sub.join("child.mp3"), b"not real").unwrap();

    let settings = LibrarySettings {
        recursive: false,
        ..LibrarySettings::default()
    };
    let tracks = scan(dir.path(), &settings);
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].display, "root");
}

#[test]
fn scan_respects_max_depth() {
    let dir = tempdir().unwrap();
    let d1 = dir.path().join("d1");
    let d2 = d1.join("d2");
    fs::create_dir_all(&d2).unwrap();
    fs::write(dir.path().join("root.mp3"), b"not real").unwrap();
    fs::write(d1.join("one.mp3"), b"not real").unwrap();
    fs::write(d2.join("two.mp3"), b"not real").unwrap();

    // Root is depth 0, so max_depth=2 reaches d1/* but not d1/d2/*.
    let settings = LibrarySettings {
        max_depth: Some(2),
        ..LibrarySettings::default()
    };
    let names: Vec<String> = scan(dir.path(), &settings)
        .into_iter()
        .map(|t| t.display)
        .collect();
    assert!(names.contains(&"root".to_string()));
    assert!(names.contains(&"one".to_string()));
    assert!(!names.contains(&"two".to_string()));
}
