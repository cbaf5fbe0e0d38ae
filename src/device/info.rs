use super::{
    DeviceDescription, DEVICE_FAMILY_PREFIXES, SIMULATOR_IDENTIFIER, SIMULATOR_SUFFIX,
};
use crate::{
    uti::{Database, Error, TypeDeclaration},
    util,
};
use indexmap::IndexMap;
use once_cell_regex::regex;
use std::collections::HashMap;

#[derive(Debug, Default)]
struct Group {
    type_identifiers: Vec<String>,
    description: Option<String>,
}

/// Resolved device metadata, built once from the UTI database.
///
/// Resolution is a pure one-shot transform: building twice from the same
/// database yields identical results, and lookups never mutate anything.
#[derive(Debug)]
pub struct DeviceInfo {
    devices: Vec<DeviceDescription>,
    names: HashMap<String, String>,
}

impl DeviceInfo {
    /// Reads the system UTI database and resolves every known device.
    ///
    /// Any failure to read or traverse the database is fatal to the whole
    /// resolution; there's no partial result to fall back on.
    pub fn new() -> Result<Self, Error> {
        Ok(Self::from_database(&Database::load()?))
    }

    pub fn from_database(database: &Database) -> Self {
        Self::from_declarations(database.declarations())
    }

    pub fn from_declarations(declarations: &[TypeDeclaration]) -> Self {
        let mut groups = IndexMap::<String, Group>::new();
        for declaration in declarations {
            let model_code = match device_model_code(declaration) {
                Some(model_code) => model_code,
                None => {
                    log::debug!(
                        "declaration {:?} has no device model code; skipping",
                        declaration.type_identifier
                    );
                    continue;
                }
            };
            // First-seen order of distinct identifiers determines display
            // order, so the map must never reorder on repeat insertions.
            let group = groups
                .entry(model_code.to_owned())
                .or_insert_with(Group::default);
            group.type_identifiers.push(declaration.type_identifier.clone());
            if group.description.is_none() {
                group.description = declaration.description.clone();
            }
        }
        log::info!("resolved {} known devices", groups.len());

        let mut devices = Vec::with_capacity(groups.len() + 1);
        let mut names = HashMap::with_capacity(groups.len() + 1);
        for (identifier, group) in groups {
            if let Some(description) = group.description {
                names.insert(identifier.clone(), description);
            }
            let colors = color_suffixes(&group.type_identifiers);
            devices.push(DeviceDescription::new(identifier, colors));
        }

        // The Simulator isn't in the database; it always goes last.
        devices.push(DeviceDescription::new(
            SIMULATOR_IDENTIFIER.to_owned(),
            Vec::new(),
        ));
        names.insert(SIMULATOR_IDENTIFIER.to_owned(), "Simulator".to_owned());

        Self { devices, names }
    }

    /// Every known device, in the order the database declares them, with the
    /// Simulator entry last.
    pub fn devices(&self) -> &[DeviceDescription] {
        &self.devices
    }

    /// Color variants for one device; empty for single-variant and unknown
    /// devices.
    pub fn colors_for_device(&self, identifier: &str) -> &[String] {
        self.devices
            .iter()
            .find(|device| device.identifier() == identifier)
            .map(DeviceDescription::colors)
            .unwrap_or(&[])
    }

    /// Descriptive name for a model identifier, e.g. `"iPhone8,1"` to
    /// "iPhone 6s".
    ///
    /// An identifier suffixed with `";Simulator"` resolves the underlying
    /// device and appends " Simulator". Unknown identifiers are returned
    /// unchanged.
    pub fn name_for_device(&self, identifier: &str) -> String {
        if let Some(base) = identifier.strip_suffix(SIMULATOR_SUFFIX) {
            return format!("{} Simulator", self.name_for_device(base));
        }
        self.names
            .get(identifier)
            .cloned()
            .unwrap_or_else(|| identifier.to_owned())
    }

    /// Like [`DeviceInfo::name_for_device`], but with model numbers and
    /// cellular connection details stripped out.
    pub fn short_name_for_device(&self, identifier: &str) -> String {
        shorten_name(&self.name_for_device(identifier))
    }
}

fn device_model_code(declaration: &TypeDeclaration) -> Option<&str> {
    declaration
        .model_codes
        .iter()
        .map(String::as_str)
        .find(|model_code| {
            DEVICE_FAMILY_PREFIXES
                .iter()
                .any(|prefix| model_code.starts_with(prefix))
        })
}

fn color_suffixes(type_identifiers: &[String]) -> Vec<String> {
    if type_identifiers.len() < 2 {
        // Single-variant device; callers show a disabled "Default" choice.
        return Vec::new();
    }
    let prefix_len = util::common_prefix_len(type_identifiers);
    type_identifiers
        .iter()
        .map(|type_identifier| type_identifier[prefix_len..].to_owned())
        .collect()
}

fn shorten_name(name: &str) -> String {
    regex!(r"\s*\([^()]*(?:\bA\d{4}\b|\bGSM\b|\bCDMA\b|Wi-Fi|Cellular|Global)[^()]*\)")
        .replace_all(name, "")
        .trim()
        .to_owned()
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    fn declaration(
        type_identifier: &str,
        description: Option<&str>,
        model_codes: &[&str],
    ) -> TypeDeclaration {
        TypeDeclaration {
            type_identifier: type_identifier.to_owned(),
            description: description.map(str::to_owned),
            model_codes: model_codes.iter().map(|s| (*s).to_owned()).collect(),
        }
    }

    fn identifiers(info: &DeviceInfo) -> Vec<&str> {
        info.devices()
            .iter()
            .map(DeviceDescription::identifier)
            .collect()
    }

    #[test]
    fn simulator_entry_is_always_last() {
        let info = DeviceInfo::from_declarations(&[
            declaration("com.apple.iphone", Some("iPhone"), &["iPhone1,1"]),
            declaration("com.apple.ipad-2", Some("iPad 2"), &["iPad2,1"]),
        ]);
        // distinct devices + 1
        assert_eq!(info.devices().len(), 3);
        assert_eq!(identifiers(&info), ["iPhone1,1", "iPad2,1", "x86_64"]);
        assert!(info.devices().last().unwrap().colors().is_empty());
    }

    #[test]
    fn device_order_follows_first_appearance() {
        let info = DeviceInfo::from_declarations(&[
            declaration("com.apple.ipad-2-black", None, &["iPad2,1"]),
            declaration("com.apple.iphone", None, &["iPhone1,1"]),
            declaration("com.apple.ipad-2-white", None, &["iPad2,1"]),
        ]);
        assert_eq!(identifiers(&info), ["iPad2,1", "iPhone1,1", "x86_64"]);
    }

    #[test]
    fn single_variant_device_has_no_colors() {
        let info = DeviceInfo::from_declarations(&[declaration(
            "com.apple.iphone",
            None,
            &["iPhone1,1"],
        )]);
        assert!(info.colors_for_device("iPhone1,1").is_empty());
    }

    #[test]
    fn color_suffixes_strip_the_common_prefix_in_order() {
        let info = DeviceInfo::from_declarations(&[
            declaration("com.apple.device-type-blue", None, &["iPod4,1"]),
            declaration("com.apple.device-type-red", None, &["iPod4,1"]),
        ]);
        assert_eq!(info.colors_for_device("iPod4,1"), ["blue", "red"]);
    }

    #[test]
    fn empty_suffix_is_preserved_when_one_name_prefixes_another() {
        let info = DeviceInfo::from_declarations(&[
            declaration("a.b.foo", None, &["Watch1,1"]),
            declaration("a.b.foobar", None, &["Watch1,1"]),
        ]);
        assert_eq!(info.colors_for_device("Watch1,1"), ["", "bar"]);
    }

    #[test]
    fn sku_strings_are_filtered_and_first_match_wins() {
        let info = DeviceInfo::from_declarations(&[declaration(
            "com.apple.iphone-3g",
            None,
            &["XYZ123-SKU", "iPhone1,2"],
        )]);
        assert_eq!(identifiers(&info), ["iPhone1,2", "x86_64"]);
    }

    #[test]
    fn declarations_without_device_codes_are_skipped() {
        let info = DeviceInfo::from_declarations(&[
            declaration("public.jpeg", Some("JPEG image"), &[]),
            declaration("com.apple.appletv", Some("Apple TV"), &["AppleTV2,1"]),
        ]);
        assert_eq!(identifiers(&info), ["AppleTV2,1", "x86_64"]);
    }

    #[test]
    fn resolution_is_pure() {
        let declarations = [
            declaration("com.apple.ipad-2-black", Some("iPad 2"), &["iPad2,1"]),
            declaration("com.apple.ipad-2-white", None, &["iPad2,1"]),
            declaration("com.apple.iphone", Some("iPhone"), &["iPhone1,1"]),
        ];
        let first = DeviceInfo::from_declarations(&declarations);
        let second = DeviceInfo::from_declarations(&declarations);
        assert_eq!(first.devices(), second.devices());
    }

    #[test]
    fn names_come_from_the_first_described_declaration() {
        let info = DeviceInfo::from_declarations(&[
            declaration("com.apple.ipad-2-black", None, &["iPad2,1"]),
            declaration("com.apple.ipad-2-white", Some("iPad 2"), &["iPad2,1"]),
        ]);
        assert_eq!(info.name_for_device("iPad2,1"), "iPad 2");
    }

    #[test]
    fn unknown_devices_fall_back_to_the_identifier() {
        let info = DeviceInfo::from_declarations(&[]);
        assert_eq!(info.name_for_device("iPhone99,9"), "iPhone99,9");
    }

    #[test]
    fn simulator_identifiers_are_resolved() {
        let info = DeviceInfo::from_declarations(&[declaration(
            "com.apple.iphone-6s",
            Some("iPhone 6s"),
            &["iPhone8,1"],
        )]);
        assert_eq!(info.name_for_device("x86_64"), "Simulator");
        assert_eq!(
            info.name_for_device("iPhone8,1;Simulator"),
            "iPhone 6s Simulator"
        );
    }

    #[rstest(
        name, expected,
        case("iPhone 4 (GSM)", "iPhone 4"),
        case("iPad 2 (Wi-Fi)", "iPad 2"),
        case("iPhone 5 (model A1428)", "iPhone 5"),
        case("iPad (3rd generation)", "iPad (3rd generation)"),
        case("Apple Watch", "Apple Watch")
    )]
    fn short_names_strip_model_and_connection_details(name: &str, expected: &str) {
        assert_eq!(shorten_name(name), expected);
    }
}
