use crate::util::cli::{Report, Reportable};
use plist::{Dictionary, Value};
use std::{
    fs::File,
    io::{self, BufReader},
    path::Path,
};
use thiserror::Error;

/// Where macOS keeps its catalog of mobile device UTI declarations.
pub static DATABASE_PATH: &str =
    "/System/Library/CoreServices/CoreTypes.bundle/Contents/Library/MobileDevices.bundle/Contents/Info.plist";

static EXPORTED_DECLARATIONS: &str = "UTExportedTypeDeclarations";
static TYPE_IDENTIFIER: &str = "UTTypeIdentifier";
static TYPE_DESCRIPTION: &str = "UTTypeDescription";
static TAG_SPECIFICATION: &str = "UTTypeTagSpecification";
static MODEL_CODE_TAG: &str = "com.apple.device-model-code";

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to open the UTI database: {0}")]
    DatabaseOpenFailed(#[from] io::Error),
    #[error("The UTI database isn't a valid property list: {0}")]
    DatabaseMalformed(#[from] plist::Error),
    #[error("UTI database entry {key:?} is missing or isn't the expected type")]
    SchemaInvalid { key: &'static str },
}

impl Error {
    fn schema(key: &'static str) -> Self {
        Self::SchemaInvalid { key }
    }
}

impl Reportable for Error {
    fn report(&self) -> Report {
        Report::error("Failed to load the mobile device UTI database", self)
    }
}

/// One exported UTI declaration, reduced to the fields device resolution
/// cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDeclaration {
    /// The declared UTI, e.g. `"com.apple.iphone-4-black"`.
    pub type_identifier: String,
    /// Human-readable description, e.g. `"iPhone 4"`.
    pub description: Option<String>,
    /// Model code tags; a mix of device identifiers (`"iPhone3,1"`) and
    /// SKU-like strings (`"A1332"`).
    pub model_codes: Vec<String>,
}

impl TypeDeclaration {
    fn from_dictionary(declaration: &Dictionary) -> Result<Self, Error> {
        let type_identifier = declaration
            .get(TYPE_IDENTIFIER)
            .and_then(Value::as_string)
            .ok_or_else(|| Error::schema(TYPE_IDENTIFIER))?
            .to_owned();
        let description = declaration
            .get(TYPE_DESCRIPTION)
            .and_then(Value::as_string)
            .map(str::to_owned);
        // Many declarations are unrelated UTIs with no model codes at all,
        // and the original implementation's conditional casts failed soft on
        // mistyped tag data, so everything here is optional.
        let model_codes = declaration
            .get(TAG_SPECIFICATION)
            .and_then(Value::as_dictionary)
            .and_then(|tags| tags.get(MODEL_CODE_TAG))
            .and_then(string_array)
            .unwrap_or_default();
        Ok(Self {
            type_identifier,
            description,
            model_codes,
        })
    }
}

fn string_array(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|entry| entry.as_string().map(str::to_owned))
        .collect()
}

/// The parsed declaration list, in document order.
#[derive(Debug)]
pub struct Database {
    declarations: Vec<TypeDeclaration>,
}

impl Database {
    pub fn load() -> Result<Self, Error> {
        Self::load_path(DATABASE_PATH)
    }

    pub fn load_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let file = File::open(path.as_ref())?;
        let value = Value::from_reader(BufReader::new(file))?;
        Self::from_value(&value)
    }

    fn from_value(value: &Value) -> Result<Self, Error> {
        let declarations = value
            .as_dictionary()
            .and_then(|root| root.get(EXPORTED_DECLARATIONS))
            .and_then(Value::as_array)
            .ok_or_else(|| Error::schema(EXPORTED_DECLARATIONS))?
            .iter()
            .map(|declaration| {
                declaration
                    .as_dictionary()
                    .ok_or_else(|| Error::schema(EXPORTED_DECLARATIONS))
                    .and_then(TypeDeclaration::from_dictionary)
            })
            .collect::<Result<Vec<_>, _>>()?;
        log::info!("loaded {} exported type declarations", declarations.len());
        Ok(Self { declarations })
    }

    pub fn declarations(&self) -> &[TypeDeclaration] {
        &self.declarations
    }
}
