use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A platform-specific credential set nested under an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    /// Internal identifier.
    #[serde(default)]
    pub id: String,

    /// Public identifier used in resource URLs.
    #[serde(rename = "variantID")]
    pub variant_id: String,

    /// Display name.
    pub name: String,

    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Owning developer.
    #[serde(default)]
    pub developer: String,

    /// Generated on creation.
    #[serde(default)]
    pub secret: String,

    /// Platform tag and platform-specific fields.
    #[serde(flatten)]
    pub kind: VariantKind,
}

impl Variant {
    /// Platform tag of this variant.
    pub fn variant_type(&self) -> VariantType {
        self.kind.variant_type()
    }
}

/// Platform-specific part of a [`Variant`], tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum VariantKind {
    /// Firebase/GCM credentials.
    Android {
        /// Server key used to talk to FCM.
        #[serde(rename = "googleKey")]
        google_key: String,
        /// Sender/project number.
        #[serde(
            rename = "projectNumber",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        project_number: Option<String>,
    },
    /// APNs certificate credentials.
    Ios {
        /// Whether the certificate targets the production gateway.
        #[serde(default)]
        production: bool,
        /// Certificate content as stored by the server.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        certificate: Option<String>,
        /// Certificate passphrase.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        password: Option<String>,
    },
}

impl VariantKind {
    /// Platform tag of this kind.
    pub fn variant_type(&self) -> VariantType {
        match self {
            Self::Android { .. } => VariantType::Android,
            Self::Ios { .. } => VariantType::Ios,
        }
    }
}

/// The `type` tag distinguishing variant platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantType {
    /// Android (FCM).
    Android,
    /// iOS (APNs).
    Ios,
}

impl VariantType {
    /// Wire tag, also used as the create endpoint's path segment.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Android => "android",
            Self::Ios => "ios",
        }
    }
}

impl fmt::Display for VariantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognized variant tag.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown variant type '{0}': expected 'android' or 'ios'")]
pub struct UnknownVariantType(pub String);

impl FromStr for VariantType {
    type Err = UnknownVariantType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "android" => Ok(Self::Android),
            "ios" => Ok(Self::Ios),
            other => Err(UnknownVariantType(other.to_string())),
        }
    }
}

/// Payload for creating a variant, one case per platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewVariant {
    /// Sent as a JSON body.
    Android(NewAndroidVariant),
    /// Sent as a multipart form, since it carries a certificate file.
    Ios(NewIosVariant),
}

impl NewVariant {
    /// Platform tag of the variant to create.
    pub fn variant_type(&self) -> VariantType {
        match self {
            Self::Android(_) => VariantType::Android,
            Self::Ios(_) => VariantType::Ios,
        }
    }

    /// Requested display name.
    pub fn name(&self) -> &str {
        match self {
            Self::Android(v) => &v.name,
            Self::Ios(v) => &v.name,
        }
    }
}

impl From<NewAndroidVariant> for NewVariant {
    fn from(v: NewAndroidVariant) -> Self {
        Self::Android(v)
    }
}

impl From<NewIosVariant> for NewVariant {
    fn from(v: NewIosVariant) -> Self {
        Self::Ios(v)
    }
}

/// Payload for creating an Android variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAndroidVariant {
    /// Display name.
    pub name: String,

    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Owning developer. The server fills in a default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub developer: Option<String>,

    /// Server key used to talk to FCM.
    pub google_key: String,

    /// Sender/project number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_number: Option<String>,
}

impl NewAndroidVariant {
    /// Create a payload with the required fields.
    pub fn new(name: impl Into<String>, google_key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            developer: None,
            google_key: google_key.into(),
            project_number: None,
        }
    }

    /// Set the project number.
    pub fn with_project_number(mut self, project_number: impl Into<String>) -> Self {
        self.project_number = Some(project_number.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the developer.
    pub fn with_developer(mut self, developer: impl Into<String>) -> Self {
        self.developer = Some(developer.into());
        self
    }
}

/// Payload for creating an iOS variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIosVariant {
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Owning developer. The server fills in a default when absent.
    pub developer: Option<String>,
    /// APNs certificate file.
    pub certificate: IosCertificate,
    /// Certificate passphrase.
    pub password: String,
    /// Whether the certificate targets the production gateway.
    pub production: bool,
}

impl NewIosVariant {
    /// Create a payload for a development certificate.
    pub fn new(
        name: impl Into<String>,
        certificate: IosCertificate,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: None,
            developer: None,
            certificate,
            password: password.into(),
            production: false,
        }
    }

    /// Mark the certificate as a production one.
    pub fn production(mut self, production: bool) -> Self {
        self.production = production;
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the developer.
    pub fn with_developer(mut self, developer: impl Into<String>) -> Self {
        self.developer = Some(developer.into());
        self
    }
}

/// A certificate file (usually `.p12`) uploaded with an iOS variant.
#[derive(Clone, PartialEq, Eq)]
pub struct IosCertificate {
    /// File name reported in the multipart part.
    pub file_name: String,
    /// Raw file content.
    pub bytes: Vec<u8>,
}

impl IosCertificate {
    /// Wrap certificate bytes with the file name to upload them under.
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }
}

impl fmt::Debug for IosCertificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IosCertificate")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_android_variant_wire_shape() {
        let json = r#"{
            "id": "1",
            "variantID": "v-1",
            "name": "Droid",
            "developer": "admin",
            "secret": "s",
            "type": "android",
            "googleKey": "123456",
            "projectNumber": "42"
        }"#;
        let variant: Variant = serde_json::from_str(json).unwrap();
        assert_eq!(variant.variant_id, "v-1");
        assert_eq!(variant.variant_type(), VariantType::Android);
        assert_eq!(
            variant.kind,
            VariantKind::Android {
                google_key: "123456".to_string(),
                project_number: Some("42".to_string()),
            }
        );

        let value = serde_json::to_value(&variant).unwrap();
        assert_eq!(value["type"], "android");
        assert_eq!(value["googleKey"], "123456");
        assert_eq!(value["variantID"], "v-1");
    }

    #[test]
    fn test_ios_variant_defaults() {
        let json = r#"{"variantID": "v-2", "name": "Apple", "type": "ios"}"#;
        let variant: Variant = serde_json::from_str(json).unwrap();
        assert_eq!(
            variant.kind,
            VariantKind::Ios {
                production: false,
                certificate: None,
                password: None,
            }
        );
    }

    #[test]
    fn test_unknown_type_tag_is_rejected() {
        let json = r#"{"variantID": "v-3", "name": "Win", "type": "windows_wns"}"#;
        assert!(serde_json::from_str::<Variant>(json).is_err());
    }

    #[test]
    fn test_variant_type_parsing() {
        assert_eq!("android".parse::<VariantType>(), Ok(VariantType::Android));
        assert_eq!("ios".parse::<VariantType>(), Ok(VariantType::Ios));
        assert_eq!(
            "simplePush".parse::<VariantType>(),
            Err(UnknownVariantType("simplePush".to_string()))
        );
        assert_eq!(VariantType::Ios.to_string(), "ios");
    }

    #[test]
    fn test_new_android_variant_json() {
        let payload = NewAndroidVariant::new("Droid", "key").with_project_number("42");
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "name": "Droid", "googleKey": "key", "projectNumber": "42" })
        );
    }

    #[test]
    fn test_certificate_debug_hides_content() {
        let cert = IosCertificate::new("cert.p12", vec![1, 2, 3]);
        let rendered = format!("{cert:?}");
        assert!(rendered.contains("cert.p12"));
        assert!(rendered.contains("len: 3"));
    }
}
