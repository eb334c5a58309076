use serde::{Deserialize, Serialize};
use snafu::Snafu;
use std::{
    fmt::{self, Display},
    str::FromStr,
};

///opaque identifier handed out by the students API
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(String);

impl StudentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Snafu)]
#[snafu(display("Unknown gender {value:?}"))]
pub struct UnknownGenderError {
    value: String,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Other,
}

impl Gender {
    pub const ALL: [Self; 3] = [Self::Male, Self::Female, Self::Other];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        }
    }
}

impl FromStr for Gender {
    type Err = UnknownGenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|gender| gender.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownGenderError {
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Snafu)]
#[snafu(display("Unknown student field {name:?}"))]
pub struct UnknownFieldError {
    name: String,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudentField {
    Email,
    FirstName,
    LastName,
    Country,
    Gender,
    Avatar,
    BtcAddress,
}

impl StudentField {
    pub const ALL: [Self; 7] = [
        Self::Email,
        Self::FirstName,
        Self::LastName,
        Self::Country,
        Self::Gender,
        Self::Avatar,
        Self::BtcAddress,
    ];

    ///name used on the wire and in form bodies
    pub const fn name(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Country => "country",
            Self::Gender => "gender",
            Self::Avatar => "avatar",
            Self::BtcAddress => "btc_address",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Email => "Email address",
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Country => "Country",
            Self::Gender => "Gender",
            Self::Avatar => "Avatar Base64",
            Self::BtcAddress => "BTC Address",
        }
    }
}

impl FromStr for StudentField {
    type Err = UnknownFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| UnknownFieldError {
                name: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentDraft {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub country: String,
    pub gender: Gender,
    pub avatar: String,
    pub btc_address: String,
}

impl StudentDraft {
    pub fn value(&self, field: StudentField) -> &str {
        match field {
            StudentField::Email => &self.email,
            StudentField::FirstName => &self.first_name,
            StudentField::LastName => &self.last_name,
            StudentField::Country => &self.country,
            StudentField::Gender => self.gender.as_str(),
            StudentField::Avatar => &self.avatar,
            StudentField::BtcAddress => &self.btc_address,
        }
    }

    ///only touches `field` - on a bad gender nothing changes
    pub fn set(&mut self, field: StudentField, value: String) -> Result<(), UnknownGenderError> {
        match field {
            StudentField::Email => self.email = value,
            StudentField::FirstName => self.first_name = value,
            StudentField::LastName => self.last_name = value,
            StudentField::Country => self.country = value,
            StudentField::Gender => self.gender = value.parse()?,
            StudentField::Avatar => self.avatar = value,
            StudentField::BtcAddress => self.btc_address = value,
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub id: StudentId,
    #[serde(flatten)]
    pub fields: StudentDraft,
}
