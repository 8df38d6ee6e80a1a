//! Long-format directory listings.
//!
//! Produces the same shape as `ls -l -A --time-style="+%Y-%m-%d %H:%M:%S"`:
//! a `total` line followed by one line per entry, sorted by name.

use std::fs::Metadata;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local};
use log::warn;
use tokio::fs;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One row of a listing, with every column already rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    mode: String,
    links: String,
    owner: String,
    group: String,
    size: String,
    modified: String,
    name: String,
}

/// List `dir`, returning the rendered listing as bytes.
pub async fn list_directory(dir: &Path) -> io::Result<Vec<u8>> {
    let mut paths = Vec::new();
    let mut read_dir = fs::read_dir(dir).await?;
    while let Some(dir_entry) = read_dir.next_entry().await? {
        paths.push(dir_entry.path());
    }

    let (blocks, mut entries) = collect_entries(paths).await;
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(render(blocks, &entries).into_bytes())
}

/// Stat each path into a listing row, returning the block total alongside.
///
/// Entries that disappear between the directory read and the stat are
/// skipped.
async fn collect_entries(paths: Vec<PathBuf>) -> (u64, Vec<Entry>) {
    let mut entries = Vec::with_capacity(paths.len());
    let mut blocks = 0;

    for path in paths {
        let metadata = match fs::symlink_metadata(&path).await {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!("Skipping {path} in listing: {e}", path = path.display());
                continue;
            }
        };

        let mut name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        if metadata.file_type().is_symlink() {
            if let Ok(target) = fs::read_link(&path).await {
                name = format!("{name} -> {target}", target = target.display());
            }
        }

        blocks += kib_blocks(&metadata);
        entries.push(Entry {
            mode: mode_string(&metadata),
            links: link_count(&metadata).to_string(),
            owner: owner_id(&metadata),
            group: group_id(&metadata),
            size: metadata.len().to_string(),
            modified: format_time(metadata.modified().ok()),
            name,
        });
    }

    (blocks, entries)
}

fn render(blocks: u64, entries: &[Entry]) -> String {
    let links_w = column_width(entries, |e| e.links.len());
    let owner_w = column_width(entries, |e| e.owner.len());
    let group_w = column_width(entries, |e| e.group.len());
    let size_w = column_width(entries, |e| e.size.len());

    let mut out = format!("total {blocks}\n");
    for e in entries {
        out.push_str(&format!(
            "{mode} {links:>links_w$} {owner:>owner_w$} {group:>group_w$} {size:>size_w$} {modified} {name}\n",
            mode = e.mode,
            links = e.links,
            owner = e.owner,
            group = e.group,
            size = e.size,
            modified = e.modified,
            name = e.name,
        ));
    }
    out
}

fn column_width(entries: &[Entry], width: impl Fn(&Entry) -> usize) -> usize {
    entries.iter().map(width).max().unwrap_or(0)
}

fn format_time(time: Option<SystemTime>) -> String {
    match time {
        Some(time) => DateTime::<Local>::from(time).format(TIME_FORMAT).to_string(),
        None => "????-??-?? ??:??:??".to_string(),
    }
}

#[cfg(unix)]
fn mode_string(metadata: &Metadata) -> String {
    use std::os::unix::fs::{FileTypeExt, PermissionsExt};

    let file_type = metadata.file_type();
    let kind = if file_type.is_dir() {
        'd'
    } else if file_type.is_symlink() {
        'l'
    } else if file_type.is_fifo() {
        'p'
    } else if file_type.is_socket() {
        's'
    } else if file_type.is_char_device() {
        'c'
    } else if file_type.is_block_device() {
        'b'
    } else {
        '-'
    };

    format_mode(kind, metadata.permissions().mode())
}

/// Render a type character and raw mode bits as `drwxr-xr-x`.
///
/// setuid, setgid and sticky replace the matching execute slot with
/// `s`/`t`, upper-cased when the execute bit itself is clear.
fn format_mode(kind: char, mode: u32) -> String {
    let mut out = String::with_capacity(10);
    out.push(kind);
    for (shift, special_bit, special) in [(6, 0o4000, 's'), (3, 0o2000, 's'), (0, 0o1000, 't')] {
        let bits = (mode >> shift) & 0o7;
        out.push(if bits & 0o4 != 0 { 'r' } else { '-' });
        out.push(if bits & 0o2 != 0 { 'w' } else { '-' });
        out.push(match (mode & special_bit != 0, bits & 0o1 != 0) {
            (true, true) => special,
            (true, false) => special.to_ascii_uppercase(),
            (false, true) => 'x',
            (false, false) => '-',
        });
    }
    out
}

#[cfg(not(unix))]
fn mode_string(metadata: &Metadata) -> String {
    let kind = if metadata.is_dir() { 'd' } else { '-' };
    let mode = if metadata.permissions().readonly() { 0o444 } else { 0o666 };
    format_mode(kind, mode)
}

#[cfg(unix)]
fn link_count(metadata: &Metadata) -> u64 {
    std::os::unix::fs::MetadataExt::nlink(metadata)
}

#[cfg(not(unix))]
fn link_count(_metadata: &Metadata) -> u64 {
    1
}

#[cfg(unix)]
fn owner_id(metadata: &Metadata) -> String {
    std::os::unix::fs::MetadataExt::uid(metadata).to_string()
}

#[cfg(not(unix))]
fn owner_id(_metadata: &Metadata) -> String {
    "-".to_string()
}

#[cfg(unix)]
fn group_id(metadata: &Metadata) -> String {
    std::os::unix::fs::MetadataExt::gid(metadata).to_string()
}

#[cfg(not(unix))]
fn group_id(_metadata: &Metadata) -> String {
    "-".to_string()
}

// st_blocks counts 512-byte units; the listing reports 1 KiB blocks.
#[cfg(unix)]
fn kib_blocks(metadata: &Metadata) -> u64 {
    std::os::unix::fs::MetadataExt::blocks(metadata).div_ceil(2)
}

#[cfg(not(unix))]
fn kib_blocks(metadata: &Metadata) -> u64 {
    metadata.len().div_ceil(1024)
}
