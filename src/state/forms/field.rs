//! Form field schema and value objects

use serde::{Deserialize, Serialize};

/// Number of fields in the intake form
pub const FIELD_COUNT: usize = 10;

/// Closed set of field identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    FirstName,
    LastName,
    Email,
    Mobile,
    Gender,
    Dob,
    DobDay,
    DobMonth,
    DobYear,
    Comments,
}

impl FieldId {
    /// All fields in declaration order
    pub const ALL: [FieldId; FIELD_COUNT] = [
        FieldId::FirstName,
        FieldId::LastName,
        FieldId::Email,
        FieldId::Mobile,
        FieldId::Gender,
        FieldId::Dob,
        FieldId::DobDay,
        FieldId::DobMonth,
        FieldId::DobYear,
        FieldId::Comments,
    ];

    /// Position in `ALL`, used to index fixed-size per-field tables
    pub fn index(self) -> usize {
        self as usize
    }

    /// Key used in the JSON request body
    pub fn wire_key(self) -> &'static str {
        self.spec().wire_key
    }

    pub fn label(self) -> &'static str {
        self.spec().label
    }

    pub fn step(self) -> Step {
        self.spec().step
    }

    pub fn kind(self) -> FieldKind {
        self.spec().kind
    }

    /// True for fields computed from other fields rather than edited
    pub fn is_derived(self) -> bool {
        self.spec().derived
    }

    pub fn max_len(self) -> Option<usize> {
        self.spec().max_len
    }

    /// True for the three inputs that make up the date of birth
    pub fn is_date_part(self) -> bool {
        matches!(self, FieldId::DobDay | FieldId::DobMonth | FieldId::DobYear)
    }

    pub fn spec(self) -> &'static FieldSpec {
        &FIELD_SCHEMA[self.index()]
    }
}

/// How a field is presented and edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line text input
    Text,
    /// Multi-line text input
    TextArea,
    /// One value out of a fixed option list
    Select(&'static [&'static str]),
    /// One segment of a split date input
    Date,
    /// Not rendered; value is derived
    Hidden,
}

/// Static description of one field
#[derive(Debug)]
pub struct FieldSpec {
    pub id: FieldId,
    pub wire_key: &'static str,
    pub label: &'static str,
    pub step: Step,
    pub kind: FieldKind,
    pub derived: bool,
    pub max_len: Option<usize>,
}

/// Gender choices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Select,
    Male,
    Female,
    NonBinary,
    PreferNotToSay,
}

impl Gender {
    /// Placeholder shown before a real option is picked
    pub const PLACEHOLDER: &'static str = "Select Gender";

    /// Options in display order, placeholder first
    pub const OPTIONS: [&'static str; 5] = [
        Self::PLACEHOLDER,
        "Male",
        "Female",
        "Non-Binary",
        "Prefer not to say",
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Select => Self::PLACEHOLDER,
            Self::Male => "Male",
            Self::Female => "Female",
            Self::NonBinary => "Non-Binary",
            Self::PreferNotToSay => "Prefer not to say",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            Self::PLACEHOLDER => Some(Self::Select),
            "Male" => Some(Self::Male),
            "Female" => Some(Self::Female),
            "Non-Binary" => Some(Self::NonBinary),
            "Prefer not to say" => Some(Self::PreferNotToSay),
            _ => None,
        }
    }

    /// True for options that may be submitted
    pub fn is_real(self) -> bool {
        !matches!(self, Self::Select)
    }
}

/// Field table, indexed by `FieldId::index`
pub static FIELD_SCHEMA: [FieldSpec; FIELD_COUNT] = [
    FieldSpec {
        id: FieldId::FirstName,
        wire_key: "firstName",
        label: "First Name",
        step: Step::One,
        kind: FieldKind::Text,
        derived: false,
        max_len: None,
    },
    FieldSpec {
        id: FieldId::LastName,
        wire_key: "lastName",
        label: "Last Name",
        step: Step::One,
        kind: FieldKind::Text,
        derived: false,
        max_len: None,
    },
    FieldSpec {
        id: FieldId::Email,
        wire_key: "email",
        label: "Email",
        step: Step::One,
        kind: FieldKind::Text,
        derived: false,
        max_len: None,
    },
    FieldSpec {
        id: FieldId::Mobile,
        wire_key: "mobile",
        label: "Telephone number",
        step: Step::Two,
        kind: FieldKind::Text,
        derived: false,
        max_len: None,
    },
    FieldSpec {
        id: FieldId::Gender,
        wire_key: "gender",
        label: "Gender",
        step: Step::Two,
        kind: FieldKind::Select(&Gender::OPTIONS),
        derived: false,
        max_len: None,
    },
    FieldSpec {
        id: FieldId::Dob,
        wire_key: "dob",
        label: "Date of Birth",
        step: Step::Two,
        kind: FieldKind::Hidden,
        derived: true,
        max_len: None,
    },
    FieldSpec {
        id: FieldId::DobDay,
        wire_key: "dobDay",
        label: "DD",
        step: Step::Two,
        kind: FieldKind::Date,
        derived: false,
        max_len: Some(2),
    },
    FieldSpec {
        id: FieldId::DobMonth,
        wire_key: "dobMonth",
        label: "MM",
        step: Step::Two,
        kind: FieldKind::Date,
        derived: false,
        max_len: Some(2),
    },
    FieldSpec {
        id: FieldId::DobYear,
        wire_key: "dobYear",
        label: "YYYY",
        step: Step::Two,
        kind: FieldKind::Date,
        derived: false,
        max_len: Some(4),
    },
    FieldSpec {
        id: FieldId::Comments,
        wire_key: "comments",
        label: "Comments",
        step: Step::Three,
        kind: FieldKind::TextArea,
        derived: false,
        max_len: None,
    },
];

/// The three ordered form sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Step {
    #[default]
    One,
    Two,
    Three,
}

impl Step {
    pub const ALL: [Step; 3] = [Step::One, Step::Two, Step::Three];

    pub fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::One => "Your Details",
            Self::Two => "More Comments",
            Self::Three => "Final Comments",
        }
    }

    /// Next step, or `None` from the terminal step
    pub fn next(self) -> Option<Self> {
        match self {
            Self::One => Some(Self::Two),
            Self::Two => Some(Self::Three),
            Self::Three => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }

    /// Every field belonging to this step, derived ones included
    pub fn fields(self) -> impl Iterator<Item = FieldId> {
        FieldId::ALL.into_iter().filter(move |f| f.step() == self)
    }

    /// Fields the user can focus and edit, in tab order
    pub fn editable_fields(self) -> Vec<FieldId> {
        self.fields().filter(|f| !f.is_derived()).collect()
    }
}

/// Current value of every field, serialized as the request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormValues {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile: String,
    pub gender: String,
    pub dob: String,
    pub dob_day: String,
    pub dob_month: String,
    pub dob_year: String,
    pub comments: String,
}

impl Default for FormValues {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            mobile: String::new(),
            gender: Gender::PLACEHOLDER.to_string(),
            dob: String::new(),
            dob_day: String::new(),
            dob_month: String::new(),
            dob_year: String::new(),
            comments: String::new(),
        }
    }
}

impl FormValues {
    pub fn get(&self, field: FieldId) -> &str {
        match field {
            FieldId::FirstName => &self.first_name,
            FieldId::LastName => &self.last_name,
            FieldId::Email => &self.email,
            FieldId::Mobile => &self.mobile,
            FieldId::Gender => &self.gender,
            FieldId::Dob => &self.dob,
            FieldId::DobDay => &self.dob_day,
            FieldId::DobMonth => &self.dob_month,
            FieldId::DobYear => &self.dob_year,
            FieldId::Comments => &self.comments,
        }
    }

    pub fn get_mut(&mut self, field: FieldId) -> &mut String {
        match field {
            FieldId::FirstName => &mut self.first_name,
            FieldId::LastName => &mut self.last_name,
            FieldId::Email => &mut self.email,
            FieldId::Mobile => &mut self.mobile,
            FieldId::Gender => &mut self.gender,
            FieldId::Dob => &mut self.dob,
            FieldId::DobDay => &mut self.dob_day,
            FieldId::DobMonth => &mut self.dob_month,
            FieldId::DobYear => &mut self.dob_year,
            FieldId::Comments => &mut self.comments,
        }
    }
}
