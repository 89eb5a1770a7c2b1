use camino::{Utf8Path, Utf8PathBuf};
use ini::Ini;

use crate::domain::{BoundingBox, Credentials, Product, parse_products};
use crate::error::VdsError;

pub const API_SECTION: &str = "API";

#[derive(Debug)]
pub struct IniStore {
    inner: Ini,
}

impl IniStore {
    pub fn load(path: &Utf8Path) -> Result<IniStore, VdsError> {
        if !path.exists() {
            return Err(VdsError::ConfigRead(path.to_owned()));
        }
        let inner = Ini::load_from_file(path.as_std_path())
            .map_err(|err| VdsError::ConfigParse(err.to_string()))?;
        Ok(IniStore { inner })
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.inner.section(Some(section)).and_then(|props| props.get(key))
    }

    pub fn get_or(&mut self, section: &str, key: &str, default: &str) -> String {
        match self.get(section, key) {
            Some(value) => value.to_string(),
            None => {
                self.set(section, key, default, false);
                default.to_string()
            }
        }
    }

    pub fn set(&mut self, section: &str, key: &str, value: &str, overwrite: bool) {
        let present = self.get(section, key).is_some();
        if present && !overwrite {
            return;
        }
        self.inner
            .with_section(Some(section))
            .set(key, value);
    }

    pub fn keys(&self, section: &str) -> Vec<String> {
        match self.inner.section(Some(section)) {
            Some(props) => props.iter().map(|(key, _)| key.to_string()).collect(),
            None => Vec::new(),
        }
    }

    pub fn save(&self, path: &Utf8Path) -> Result<(), VdsError> {
        self.inner
            .write_to_file(path.as_std_path())
            .map_err(|err| VdsError::Filesystem(err.to_string()))
    }
}

#[derive(Debug, Default)]
pub struct Overrides {
    pub user: Option<String>,
    pub passwd: Option<String>,
    pub output_dir: Option<Utf8PathBuf>,
    pub runinfo_file: Option<Utf8PathBuf>,
}

#[derive(Debug)]
pub struct Settings {
    pub bbox: BoundingBox,
    pub runinfo_file: Option<Utf8PathBuf>,
    pub server: String,
    pub file_format: String,
    pub credentials: Credentials,
    pub date: String,
    pub products: Vec<Product>,
    pub output_dir: Utf8PathBuf,
}

impl Settings {
    pub fn load(store: &mut IniStore, overrides: Overrides) -> Result<Settings, VdsError> {
        let lat_min = store.get_or(API_SECTION, "lat_min", "51.29971080556154");
        let lat_max = store.get_or(API_SECTION, "lat_max", "51.865468048540635");
        let lon_max = store.get_or(API_SECTION, "lon_max", "6.107025146484376");
        let lon_min = store.get_or(API_SECTION, "lon_min", "5.037231445312501");
        let runinfo = store.get_or(API_SECTION, "runinfofile", "runinfo.xml");
        let server = store.get_or(API_SECTION, "server", "maps.vandersat.com/api/v1/dam/get-area");
        let file_format = store.get_or(API_SECTION, "format", "NETCDF");
        let user = store.get_or(API_SECTION, "user", "demo");
        let passwd = store.get_or(API_SECTION, "passwd", "demos");
        let date = store.get_or(API_SECTION, "date", "2018-03-04");
        let products = store.get_or(API_SECTION, "products", "SM-SHORT-100,SM_C1N_100");
        let output_dir = store.get_or(API_SECTION, "outputdir", "");

        let runinfo_file = overrides.runinfo_file.or_else(|| {
            if runinfo.is_empty() {
                None
            } else {
                Some(Utf8PathBuf::from(runinfo))
            }
        });

        Ok(Settings {
            bbox: BoundingBox {
                lat_min,
                lat_max,
                lon_max,
                lon_min,
            },
            runinfo_file,
            server,
            file_format,
            credentials: Credentials {
                user: overrides.user.unwrap_or(user),
                passwd: overrides.passwd.unwrap_or(passwd),
            },
            date,
            products: parse_products(&products)?,
            output_dir: overrides.output_dir.unwrap_or_else(|| Utf8PathBuf::from(output_dir)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_store() -> IniStore {
        IniStore { inner: Ini::new() }
    }

    #[test]
    fn get_or_injects_default() {
        let mut store = empty_store();
        assert_eq!(store.get_or(API_SECTION, "server", "first.example"), "first.example");
        assert_eq!(store.get_or(API_SECTION, "server", "second.example"), "first.example");
    }

    #[test]
    fn set_respects_overwrite_flag() {
        let mut store = empty_store();
        store.set(API_SECTION, "user", "alice", false);
        store.set(API_SECTION, "user", "bob", false);
        assert_eq!(store.get(API_SECTION, "user"), Some("alice"));
        store.set(API_SECTION, "user", "bob", true);
        assert_eq!(store.get(API_SECTION, "user"), Some("bob"));
    }

    #[test]
    fn keys_of_missing_section_is_empty() {
        let store = empty_store();
        assert!(store.keys("nosuch").is_empty());
    }

    #[test]
    fn settings_fall_back_to_defaults() {
        let mut store = empty_store();
        let settings = Settings::load(&mut store, Overrides::default()).unwrap();
        assert_eq!(settings.server, "maps.vandersat.com/api/v1/dam/get-area");
        assert_eq!(settings.credentials.user, "demo");
        assert_eq!(settings.products.len(), 2);
        assert_eq!(settings.runinfo_file.as_deref(), Some(Utf8Path::new("runinfo.xml")));
        assert_eq!(settings.output_dir, Utf8PathBuf::from(""));
    }

    #[test]
    fn settings_apply_overrides() {
        let mut store = empty_store();
        let overrides = Overrides {
            user: Some("vandersat".to_string()),
            passwd: Some("hunter2".to_string()),
            output_dir: Some(Utf8PathBuf::from("out")),
            runinfo_file: Some(Utf8PathBuf::from("fews/runinfo.xml")),
        };
        let settings = Settings::load(&mut store, overrides).unwrap();
        assert_eq!(settings.credentials.user, "vandersat");
        assert_eq!(settings.credentials.passwd, "hunter2");
        assert_eq!(settings.output_dir, Utf8PathBuf::from("out"));
        assert_eq!(settings.runinfo_file.as_deref(), Some(Utf8Path::new("fews/runinfo.xml")));
    }

    #[test]
    fn empty_runinfofile_key_disables_descriptor() {
        let mut store = empty_store();
        store.set(API_SECTION, "runinfofile", "", false);
        let settings = Settings::load(&mut store, Overrides::default()).unwrap();
        assert_eq!(settings.runinfo_file, None);
    }
}
