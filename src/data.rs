//! Data acquisition for the sense tables.
//!
//! This module makes sure the four JSON tables are present in the data
//! directory before a dataset is loaded. Tables are inflated from gzipped
//! copies, unpacked from the bundled ZIP archive, or fetched from a remote
//! base URL, in that order of preference.

use crate::LoadOptions;
use crate::dataset::{table_file_name, table_path};
use crate::error::{Result, WordNetError};
use crate::models::Category;
use crate::progress::{ProgressReporter, ProgressUpdate, report_progress_async};
use directories_next::ProjectDirs;
use flate2::read::GzDecoder;
use futures::StreamExt;
use log::{debug, info, warn};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use zip::ZipArchive;

/// Subdirectory name within user's data directory
pub const DATA_SUBDIR: &str = "wordnet-lite";
/// Bundle looked for in the data directory when no archive is configured.
pub const ARCHIVE_FILENAME: &str = "data.zip";

/// Gets the project's data directory path.
/// Creates the directory if it doesn't exist.
pub fn get_default_data_dir() -> Result<PathBuf> {
    let proj_dirs =
        ProjectDirs::from("org", "WordNetLite", DATA_SUBDIR).ok_or(WordNetError::DataDirNotFound)?;
    let data_dir = proj_dirs.data_dir().to_path_buf();
    fs::create_dir_all(&data_dir)?;
    Ok(data_dir)
}

fn gz_table_path(dir: &Path, category: Category) -> PathBuf {
    dir.join(format!("{}.gz", table_file_name(category)))
}

/// URL of a category table under `base_url`.
pub fn table_url(base_url: &str, category: Category) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        table_file_name(category)
    )
}

fn missing_tables(dir: &Path) -> Vec<Category> {
    Category::ALL
        .into_iter()
        .filter(|category| !table_path(dir, *category).exists())
        .collect()
}

/// Maps an archive entry such as `data/Noun.json` to its category.
fn table_category(entry_path: &Path) -> Option<Category> {
    let name = entry_path.file_name()?.to_str()?.to_lowercase();
    let stem = name.strip_suffix(".json")?;
    Category::ALL
        .into_iter()
        .find(|category| category.token() == stem)
}

/// Downloads a file from a URL to a specified path using streaming with progress reporting.
///
/// The body is written to a `.part` file first so an interrupted download
/// never looks like a complete table.
async fn download_file(
    url: &str,
    dest_path: &Path,
    reporter: Option<ProgressReporter>,
) -> Result<()> {
    let stage_desc = format!("Downloading {}", file_label(dest_path));

    info!(
        "Downloading data from {} to {:?} (streaming)...",
        url, dest_path
    );
    let response = reqwest::get(url).await?.error_for_status()?;

    let total_size = response.content_length();

    if let Some(ref reporter) = reporter {
        report_progress_async(reporter, ProgressUpdate::new_stage(stage_desc.clone(), total_size))
            .await;
    }

    let part_path = dest_path.with_extension("json.part");
    let mut dest_file = BufWriter::new(File::create(&part_path)?);
    let mut stream = response.bytes_stream();
    let mut downloaded: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result?;
        dest_file.write_all(&chunk)?;
        downloaded += chunk.len() as u64;

        if let Some(ref reporter) = reporter {
            report_progress_async(
                reporter,
                ProgressUpdate::new(stage_desc.clone(), downloaded, total_size, None),
            )
            .await;
        }
    }

    dest_file.flush()?;
    drop(dest_file);
    fs::rename(&part_path, dest_path)?;

    if let Some(ref reporter) = reporter {
        report_progress_async(
            reporter,
            ProgressUpdate::new(
                stage_desc,
                downloaded,
                Some(total_size.unwrap_or(downloaded)),
                Some("Download complete.".to_string()),
            ),
        )
        .await;
    }

    info!("Download of {} complete ({} bytes).", url, downloaded);
    Ok(())
}

/// Inflates `<category>.json.gz` in `dir` into the category's table.
///
/// Output goes through a `.part` file, so a corrupt gzip leaves the table
/// missing rather than truncated.
async fn inflate_table(
    dir: &Path,
    category: Category,
    reporter: Option<ProgressReporter>,
) -> Result<()> {
    let stage_desc = format!("Inflating {} table", category);
    let gz_path = gz_table_path(dir, category);
    let dest_path = table_path(dir, category);
    let part_path = dest_path.with_extension("json.part");

    info!("Inflating {} table from {:?}", category, gz_path);

    if let Some(ref reporter) = reporter {
        report_progress_async(
            reporter,
            ProgressUpdate::new(stage_desc.clone(), 0, Some(1), Some(file_label(&gz_path))),
        )
        .await;
    }

    let inflated = tokio::task::spawn_blocking(move || -> io::Result<u64> {
        let mut decoder = GzDecoder::new(BufReader::new(File::open(&gz_path)?));
        let mut part_file = BufWriter::new(File::create(&part_path)?);
        let copied = io::copy(&mut decoder, &mut part_file).and_then(|bytes| {
            part_file.flush()?;
            Ok(bytes)
        });
        drop(part_file);
        match copied {
            Ok(bytes) => {
                fs::rename(&part_path, &dest_path)?;
                Ok(bytes)
            }
            Err(e) => {
                let _ = fs::remove_file(&part_path);
                Err(e)
            }
        }
    })
    .await??;

    if let Some(ref reporter) = reporter {
        report_progress_async(
            reporter,
            ProgressUpdate::new(stage_desc, 1, Some(1), Some(format!("{} bytes", inflated))),
        )
        .await;
    }

    debug!("Inflated {} table ({} bytes)", category, inflated);
    Ok(())
}

/// Unpacks the sense tables from a ZIP bundle into `dest_dir`.
///
/// Entries are matched by file name anywhere in the archive; everything else
/// in the bundle is skipped. Returns the categories that were extracted.
async fn unpack_archive(
    archive_path: &Path,
    dest_dir: &Path,
    reporter: Option<ProgressReporter>,
) -> Result<Vec<Category>> {
    let stage_desc = "Unpacking sense tables".to_string();

    info!("Unpacking {:?} into {:?}, may take a moment...", archive_path, dest_dir);

    if let Some(ref reporter) = reporter {
        report_progress_async(
            reporter,
            ProgressUpdate::new_stage(stage_desc.clone(), Some(Category::ALL.len() as u64)),
        )
        .await;
    }

    let archive_path = archive_path.to_path_buf();
    let dest_dir = dest_dir.to_path_buf();
    let extracted =
        tokio::task::spawn_blocking(move || extract_tables(&archive_path, &dest_dir)).await??;

    if let Some(ref reporter) = reporter {
        report_progress_async(
            reporter,
            ProgressUpdate::new(
                stage_desc,
                Category::ALL.len() as u64,
                Some(Category::ALL.len() as u64),
                Some(format!("Unpacked {} tables.", extracted.len())),
            ),
        )
        .await;
    }

    info!("Unpacked {} sense tables.", extracted.len());
    Ok(extracted)
}

fn extract_tables(archive_path: &Path, dest_dir: &Path) -> Result<Vec<Category>> {
    let file = File::open(archive_path)?;
    let mut archive = ZipArchive::new(BufReader::new(file))?;
    let mut extracted = Vec::new();

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        if entry.is_dir() {
            continue;
        }
        let Some(category) = entry.enclosed_name().as_deref().and_then(table_category) else {
            debug!("Skipping archive entry {}", entry.name());
            continue;
        };
        if extracted.contains(&category) {
            warn!(
                "Archive holds more than one {} table; keeping the first.",
                category
            );
            continue;
        }

        let dest_path = table_path(dest_dir, category);
        debug!("Extracting {} to {:?}", entry.name(), dest_path);
        let mut dest_file = BufWriter::new(File::create(&dest_path)?);
        io::copy(&mut entry, &mut dest_file)?;
        dest_file.flush()?;
        extracted.push(category);
    }

    Ok(extracted)
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Removes the unpacked tables from `dir`. Sources (archives, gzipped
/// tables) are left alone. Returns how many files were deleted.
pub fn clear_tables(dir: &Path) -> Result<usize> {
    let mut removed = 0;
    for category in Category::ALL {
        let path = table_path(dir, category);
        if path.exists() {
            fs::remove_file(&path)?;
            debug!("Removed {:?}", path);
            removed += 1;
        }
    }
    Ok(removed)
}

/// Ensures the four sense tables are present in the data directory.
/// This function unpacks, decompresses and/or downloads the data if necessary
/// and returns the directory holding the tables.
pub async fn ensure_data(
    options: &LoadOptions,
    reporter: Option<ProgressReporter>,
) -> Result<PathBuf> {
    let data_dir = match &options.data_dir {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            dir.clone()
        }
        None => get_default_data_dir()?,
    };

    if options.force_reload {
        let removed = clear_tables(&data_dir)?;
        info!(
            "Force reload requested. Removed {} unpacked tables from {:?}.",
            removed, data_dir
        );
    }

    let mut missing = missing_tables(&data_dir);
    if missing.is_empty() {
        info!("Found existing sense tables in {:?}", data_dir);
        return Ok(data_dir);
    }
    info!("Sense tables missing from {:?}: {:?}", data_dir, missing);

    // 1. Gzipped tables sitting next to the expected files
    for category in &missing {
        if gz_table_path(&data_dir, *category).exists() {
            inflate_table(&data_dir, *category, reporter.clone()).await?;
        }
    }
    missing = missing_tables(&data_dir);

    // 2. The ZIP bundle
    if !missing.is_empty() {
        let archive = match &options.archive_path {
            Some(path) if !path.exists() => {
                return Err(WordNetError::DataFileNotFound(path.display().to_string()));
            }
            Some(path) => Some(path.clone()),
            None => {
                let default_archive = data_dir.join(ARCHIVE_FILENAME);
                default_archive.exists().then_some(default_archive)
            }
        };
        if let Some(archive) = archive {
            unpack_archive(&archive, &data_dir, reporter.clone()).await?;
            missing = missing_tables(&data_dir);
        }
    }

    // 3. Remote tables
    if !missing.is_empty() {
        if let Some(base_url) = &options.base_url {
            for category in &missing {
                let url = table_url(base_url, *category);
                download_file(&url, &table_path(&data_dir, *category), reporter.clone()).await?;
            }
            missing = missing_tables(&data_dir);
        }
    }

    if !missing.is_empty() {
        let names: Vec<String> = missing.iter().map(|c| table_file_name(*c)).collect();
        return Err(WordNetError::DataFileNotFound(format!(
            "{} in {}",
            names.join(", "),
            data_dir.display()
        )));
    }

    Ok(data_dir)
}
