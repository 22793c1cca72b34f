use std::fs;

use fractic_server_error::ServerError;
use ron::from_str;

use crate::{
    data::models::theme_model::ThemeModel,
    entities::DocumentTheme,
    errors::{InvalidRon, ReadError},
};

pub(crate) trait ThemeRonDatasource {
    fn from_string(&self, s: &str) -> Result<DocumentTheme, ServerError>;

    fn from_file<P>(&self, path: P) -> Result<DocumentTheme, ServerError>
    where
        P: AsRef<std::path::Path>;
}

pub(crate) struct ThemeRonDatasourceImpl;

impl ThemeRonDatasourceImpl {
    pub(crate) fn new() -> Self {
        Self
    }
}

impl ThemeRonDatasource for ThemeRonDatasourceImpl {
    fn from_string(&self, s: &str) -> Result<DocumentTheme, ServerError> {
        let model: ThemeModel = from_str(s).map_err(|e| InvalidRon::with_debug("DocumentTheme", &e))?;
        model.try_into()
    }

    fn from_file<P>(&self, path: P) -> Result<DocumentTheme, ServerError>
    where
        P: AsRef<std::path::Path>,
    {
        self.from_string(&fs::read_to_string(path).map_err(|e| ReadError::with_debug(&e))?)
    }
}

impl DocumentTheme {
    /// Loads a theme from RON. Settings absent from `s` keep their defaults.
    pub fn from_ron_str(s: &str) -> Result<Self, ServerError> {
        ThemeRonDatasourceImpl::new().from_string(s)
    }

    pub fn from_ron_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ServerError> {
        ThemeRonDatasourceImpl::new().from_file(path)
    }
}
