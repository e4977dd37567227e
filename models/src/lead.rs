use serde::{Deserialize, Serialize};

/// Tag marking a contact whose academy subscription was cancelled.
pub const ACADEMY_CANCELLED: &str = "exac";
/// Tag marking a contact with an active academy subscription.
pub const ACADEMY_ACTIVE: &str = "acativo";
/// Tag marking a contact that opted out of e-mail.
pub const EMAIL_OPT_OUT: &str = "descadastrado";

/// A contact record as exposed by `platform/contacts`.
///
/// `email` is the identity every mutation is addressed by. Scalars are
/// omitted from the JSON when empty. `tags` and `extra_emails` distinguish
/// "never set" (`None`) from "set to an empty list" (`Some(vec![])`) in
/// memory, but both are omitted when serializing a whole lead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub uuid: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub job_title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub bio: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub website: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub personal_phone: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub mobile_phone: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub city: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub state: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub country: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub twitter: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub facebook: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub linkedin: String,
    #[serde(default, skip_serializing_if = "is_unset_or_empty")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "is_unset_or_empty")]
    pub extra_emails: Option<Vec<String>>,
}

fn is_unset_or_empty(values: &Option<Vec<String>>) -> bool {
    values.as_ref().is_none_or(Vec::is_empty)
}

impl Lead {
    /// True when every scalar is empty and both lists are unset.
    ///
    /// A lead holding `Some(vec![])` for tags is not empty.
    pub fn is_empty(&self) -> bool {
        self.uuid.is_empty()
            && self.name.is_empty()
            && self.email.is_empty()
            && self.job_title.is_empty()
            && self.bio.is_empty()
            && self.website.is_empty()
            && self.personal_phone.is_empty()
            && self.mobile_phone.is_empty()
            && self.city.is_empty()
            && self.state.is_empty()
            && self.country.is_empty()
            && self.twitter.is_empty()
            && self.facebook.is_empty()
            && self.linkedin.is_empty()
            && self.tags.is_none()
            && self.extra_emails.is_none()
    }

    /// Exact, case-sensitive membership test on `tags`.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().flatten().any(|t| t == tag)
    }
}
