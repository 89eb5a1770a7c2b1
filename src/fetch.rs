use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use chrono::NaiveDateTime;
use tracing::{error, info};

use crate::domain::{BoundingBox, Product, output_extension};
use crate::error::VdsError;
use crate::vds::{AreaRequest, VdsClient};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchSummary {
    pub written: usize,
    pub skipped: usize,
    pub failed: usize,
}

pub struct Fetcher<C> {
    client: C,
    products: Vec<Product>,
    bbox: BoundingBox,
    file_format: String,
    output_dir: Utf8PathBuf,
}

impl<C: VdsClient> Fetcher<C> {
    pub fn new(
        client: C,
        products: Vec<Product>,
        bbox: BoundingBox,
        file_format: String,
        output_dir: Utf8PathBuf,
    ) -> Fetcher<C> {
        Fetcher {
            client,
            products,
            bbox,
            file_format,
            output_dir,
        }
    }

    pub fn run(&self, dates: &[NaiveDateTime]) -> Result<FetchSummary, VdsError> {
        if !self.output_dir.as_str().is_empty() {
            fs::create_dir_all(self.output_dir.as_std_path())
                .map_err(|err| VdsError::Filesystem(err.to_string()))?;
        }

        let mut summary = FetchSummary::default();
        for date in dates {
            let day = date.format("%Y-%m-%d").to_string();
            info!("Processing date: {day}");
            for product in &self.products {
                let target = self.target_path(product, &day);
                if target.as_std_path().exists() {
                    info!("Skipping file: {target}");
                    summary.skipped += 1;
                    continue;
                }
                info!("Processing product: {product}");
                match self.download(product, &day, &target) {
                    Ok(()) => summary.written += 1,
                    Err(VdsError::VdsStatus { status }) => {
                        error!("Error while trying to get data from api: {status}");
                        summary.failed += 1;
                    }
                    Err(err) => return Err(err),
                }
            }
        }
        Ok(summary)
    }

    fn target_path(&self, product: &Product, day: &str) -> Utf8PathBuf {
        let ext = output_extension(&self.file_format);
        self.output_dir.join(format!("{product}_{day}{ext}"))
    }

    fn download(&self, product: &Product, day: &str, target: &Utf8Path) -> Result<(), VdsError> {
        let request = AreaRequest {
            bbox: &self.bbox,
            date: day,
            product,
            file_format: &self.file_format,
        };
        let temp = tempfile::Builder::new()
            .prefix("vds-download")
            .tempfile_in(self.temp_dir().as_std_path())
            .map_err(|err| VdsError::Filesystem(err.to_string()))?;
        self.client.fetch_area(&request, temp.path())?;
        info!("Writing file: {target}");
        temp.persist(target.as_std_path())
            .map_err(|err| VdsError::Filesystem(err.to_string()))?;
        Ok(())
    }

    fn temp_dir(&self) -> &Utf8Path {
        if self.output_dir.as_str().is_empty() {
            Utf8Path::new(".")
        } else {
            &self.output_dir
        }
    }
}
