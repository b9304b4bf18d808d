use crate::init::validate_archive_url;
use crate::Config;
use anyhow::{anyhow, Context, Result};
use bytes::Bytes;
use clap::Args;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use zip::ZipArchive;

#[derive(Args)]
pub(crate) struct DownloadArgs {
    #[arg(short, long)]
    output_path: Option<PathBuf>,
    #[arg(short, long)]
    url: Option<String>,
}

pub(crate) fn download(args: DownloadArgs, config: Config, base_dir: &Path) -> Result<()> {
    let url = match args.url.or(config.general.archive_url) {
        Some(url) => validate_archive_url(&url)?,
        None => {
            return Err(anyhow!(
                "No archive URL given. Pass --url or set archive_url in [general]"
            ))
        }
    };

    let cursor = fetch_zip(&url)?;
    let output_path = args
        .output_path
        .unwrap_or_else(|| base_dir.join(&config.general.data_dir));

    let count = unzip_file(cursor, &output_path)?;
    eprintln!("Unpacked {} files", count);

    Ok(())
}

fn fetch_zip(zip_url: &str) -> Result<Cursor<Bytes>> {
    eprintln!("Downloading datasets from: {}", zip_url);
    let zip_bytes = reqwest::blocking::get(zip_url)
        .and_then(|response| response.error_for_status())
        .context(format!("Failed to fetch zip file from URL: {}", zip_url))?
        .bytes()?;
    let cursor = Cursor::new(zip_bytes);
    Ok(cursor)
}

/// Extracts every entry of the archive below `output_path` and returns the
/// number of files written. Entries escaping `output_path` are skipped.
fn unzip_file<R>(data: R, output_path: &Path) -> Result<usize>
where
    R: std::io::Read + std::io::Seek,
{
    eprintln!("Unzipping datasets to: {}", output_path.display());
    let mut zip = ZipArchive::new(data).context("Failed to parse zip file")?;
    let mut count = 0;
    for i in 0..zip.len() {
        let mut file = zip
            .by_index(i)
            .context(format!("Failed to get file by index: {}", i))?;

        let Some(file_path) = file.enclosed_name() else {
            eprintln!("Skipping unsafe entry: {}", file.name());
            continue;
        };
        let out_path = output_path.join(&file_path);

        if file.is_dir() {
            std::fs::create_dir_all(&out_path)
                .context(format!("Failed to create directory: {:?}", file_path))?;
        } else {
            if let Some(parent) = out_path.parent() {
                std::fs::create_dir_all(parent)
                    .context(format!("Failed to create directory: {:?}", parent))?;
            }
            let mut output_file = std::fs::File::create(&out_path)
                .context(format!("Failed to create file: {:?}", file_path))?;
            std::io::copy(&mut file, &mut output_file)
                .context(format!("Failed to copy file: {:?}", file_path))?;
            count += 1;
        }
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::General;
    use tempfile::tempdir;

    fn config(archive_url: Option<String>) -> Config {
        Config {
            general: General {
                name: "test".to_string(),
                data_dir: PathBuf::from("data"),
                archive_url,
            },
            datasets: vec![],
        }
    }

    #[test]
    fn test_unzip_file() {
        let data = include_bytes!("tests/fixtures/datasets.zip");
        let cursor = Cursor::new(data.as_ref());
        let dir = tempdir().unwrap();

        let count = unzip_file(cursor, dir.path()).unwrap();

        assert_eq!(count, 3);
        let contents = std::fs::read_to_string(dir.path().join("sample.in")).unwrap();
        assert_eq!(contents, "3\n4 2\n5 2\n6 2\n");
        assert!(dir.path().join("sample.out").exists());
        assert!(dir.path().join("nested/extra.in").exists());
        assert!(!dir.path().parent().unwrap().join("escape.txt").exists());
    }

    #[test]
    fn test_download_into_data_dir() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/datasets.zip")
            .with_status(200)
            .with_header("content-type", "application/zip")
            .with_body_from_file("src/tests/fixtures/datasets.zip")
            .create();
        let dir = tempdir().unwrap();
        let args = DownloadArgs {
            output_path: None,
            url: None,
        };
        let config = config(Some(format!("{}/datasets.zip", server.url())));

        download(args, config, dir.path()).unwrap();

        assert!(dir.path().join("data/sample.out").exists());
        mock.assert();
    }

    #[test]
    fn test_download_reports_http_errors() {
        let mut server = mockito::Server::new();
        let mock = server.mock("GET", "/missing.zip").with_status(404).create();
        let dir = tempdir().unwrap();
        let args = DownloadArgs {
            output_path: Some(dir.path().to_path_buf()),
            url: Some(format!("{}/missing.zip", server.url())),
        };

        let result = download(args, config(None), dir.path());

        assert!(result.is_err());
        mock.assert();
    }

    #[test]
    fn test_download_requires_url() {
        let dir = tempdir().unwrap();
        let args = DownloadArgs {
            output_path: None,
            url: None,
        };
        let error = download(args, config(None), dir.path()).unwrap_err();
        assert!(error.to_string().contains("No archive URL"));
    }
}
