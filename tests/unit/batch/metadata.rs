use super::*;

fn record() -> GenotypeRecord {
    GenotypeRecord::parse_line("0,0x0003,Pale,x,Standing,Left,Smiling,Striped,Blue,,,,,,,77")
        .unwrap()
}

#[test]
fn plain_record_drops_empty_slots() {
    let flags = TraitFlags::default();
    let meta = MetadataDraft::new(12, &record(), &flags, 500).finalize(4);

    assert_eq!(meta.name, "LaserCat 12");
    assert_eq!(
        meta.description,
        "Your LaserCat's ID tag is engraved with Genotype 0x0003"
    );
    let kinds: Vec<&str> = meta
        .attributes
        .iter()
        .map(|a| a.trait_type.as_str())
        .collect();
    assert_eq!(
        kinds,
        [
            "Eyes",
            "Color",
            "Palette",
            "Pose",
            "Facing",
            "Face",
            "Fur",
            "Genotype Mint #",
            "Tier"
        ]
    );
    assert_eq!(meta.attributes[0].value, TraitValue::Text("Pacified".into()));
    assert_eq!(meta.attributes[1].value, TraitValue::Text("Blue".into()));
    assert_eq!(
        meta.attributes[6].value,
        TraitValue::Text("Striped (Prev. Gen)".into())
    );
    assert_eq!(meta.attributes[8].value, TraitValue::Number(4));
}

#[test]
fn special_flags_fill_their_slots() {
    let flags = TraitFlags {
        two_headed: true,
        distorted: true,
        laser_eyes: true,
        space_background: true,
        rainbow: true,
        laser_show: true,
    };
    let meta = MetadataDraft::new(0, &record(), &flags, 1).finalize(1);
    let values: Vec<String> = meta.attributes[..5]
        .iter()
        .map(|a| a.value.to_string())
        .collect();
    assert_eq!(
        values,
        [
            "Two Headed",
            "Laser Show",
            "Rainbow",
            "Space Background",
            "Spacetime Distortion"
        ]
    );

    let eyes_only = TraitFlags {
        laser_eyes: true,
        ..TraitFlags::default()
    };
    let meta = MetadataDraft::new(0, &record(), &eyes_only, 1).finalize(1);
    assert_eq!(meta.attributes[0].value.to_string(), "Laser Eyes");
}

#[test]
fn json_shape_matches_artifact_format() {
    let meta = MetadataDraft::new(3, &record(), &TraitFlags::default(), 9).finalize(2);
    let v = serde_json::to_value(&meta).unwrap();
    assert_eq!(v["laserCatId"], 9);
    let mint = &v["attributes"][7];
    assert_eq!(mint["display_type"], "number");
    assert_eq!(mint["trait_type"], "Genotype Mint #");
    assert_eq!(mint["value"], 77);
    assert!(v["attributes"][0].get("display_type").is_none());

    let back: Metadata = serde_json::from_value(v).unwrap();
    assert_eq!(back, meta);
}

#[test]
fn description_keeps_the_identifier_case() {
    let row = "0,0x00D1E0ff00,Pale,x,Standing,Left,Smiling,Tabby,Blue,,,,,,,1";
    let record = GenotypeRecord::parse_line(row).unwrap();
    let meta = MetadataDraft::new(0, &record, &TraitFlags::default(), 1).finalize(0);
    assert_eq!(
        meta.description,
        "Your LaserCat's ID tag is engraved with Genotype 0x00D1E0ff00"
    );
}
