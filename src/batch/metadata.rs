use crate::genotype::record::GenotypeRecord;
use crate::traits::assign::TraitFlags;

/// Attribute value: free text or a number rendered as such.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum TraitValue {
    Number(u64),
    Text(String),
}

impl std::fmt::Display for TraitValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// One `trait_type`/`value` pair.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Attribute {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_type: Option<String>,
    pub trait_type: String,
    pub value: TraitValue,
}

impl Attribute {
    pub fn text(trait_type: &str, value: impl Into<String>) -> Self {
        Self {
            display_type: None,
            trait_type: trait_type.to_string(),
            value: TraitValue::Text(value.into()),
        }
    }

    pub fn number(trait_type: &str, value: u64) -> Self {
        Self {
            display_type: Some("number".to_string()),
            trait_type: trait_type.to_string(),
            value: TraitValue::Number(value),
        }
    }
}

/// Finalized per-record metadata artifact.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Metadata {
    pub name: String,
    pub description: String,
    pub attributes: Vec<Attribute>,
    #[serde(rename = "laserCatId")]
    pub laser_cat_id: u64,
}

/// Metadata collected during the record pass; completed once the tier is known.
///
/// Slots that do not apply stay `None` and are dropped on [`MetadataDraft::finalize`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetadataDraft {
    pub name: String,
    pub description: String,
    pub slots: Vec<Option<Attribute>>,
    pub laser_cat_id: u64,
}

impl MetadataDraft {
    pub fn new(
        ordinal: usize,
        record: &GenotypeRecord,
        flags: &TraitFlags,
        laser_cat_id: u64,
    ) -> Self {
        let eyes = if flags.shows_lasers() {
            "Laser Show"
        } else if flags.laser_eyes {
            "Laser Eyes"
        } else {
            "Pacified"
        };
        let fur = if record.fur == "Striped" {
            "Striped (Prev. Gen)".to_string()
        } else {
            record.fur.clone()
        };

        let slots = vec![
            flags
                .two_headed
                .then(|| Attribute::text("Head", "Two Headed")),
            Some(Attribute::text("Eyes", eyes)),
            Some(Attribute::text(
                "Color",
                if flags.rainbow {
                    "Rainbow".to_string()
                } else {
                    record.color.clone()
                },
            )),
            flags
                .space_background
                .then(|| Attribute::text("Background", "Space Background")),
            flags
                .distorted
                .then(|| Attribute::text("Ability", "Spacetime Distortion")),
            Some(Attribute::text("Palette", record.palette.clone())),
            Some(Attribute::text("Pose", record.pose.clone())),
            Some(Attribute::text("Facing", record.facing.clone())),
            Some(Attribute::text("Face", record.face.clone())),
            Some(Attribute::text("Fur", fur)),
            Some(Attribute::number("Genotype Mint #", record.mint)),
        ];

        Self {
            name: format!("LaserCat {ordinal}"),
            description: format!(
                "Your LaserCat's ID tag is engraved with Genotype 0x{}",
                record.tag
            ),
            slots,
            laser_cat_id,
        }
    }

    /// Append the tier and drop empty slots.
    pub fn finalize(self, tier: u32) -> Metadata {
        let mut attributes: Vec<Attribute> = self.slots.into_iter().flatten().collect();
        attributes.push(Attribute {
            display_type: None,
            trait_type: "Tier".to_string(),
            value: TraitValue::Number(u64::from(tier)),
        });
        Metadata {
            name: self.name,
            description: self.description,
            attributes,
            laser_cat_id: self.laser_cat_id,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/batch/metadata.rs"]
mod tests;
