use psw_core::value::{ParamMap, ParamValue, Scalar};

fn sample_map() -> ParamMap {
    let mut map = ParamMap::new();
    map.insert("test_float".to_string(), ParamValue::from(9.12345));
    map.insert("test_int".to_string(), ParamValue::from(12345));
    map.insert("test_bool".to_string(), ParamValue::from(true));
    map.insert("test_string".to_string(), ParamValue::from("string_test"));
    map.insert(
        "test_list".to_string(),
        ParamValue::List(vec![
            Scalar::from("I"),
            Scalar::from("Am"),
            Scalar::from("A"),
            Scalar::from("List"),
        ]),
    );
    map
}

#[test]
fn values_round_trip_yaml() {
    let map = sample_map();
    let yaml = serde_yaml::to_string(&map).expect("serialize");
    let decoded: ParamMap = serde_yaml::from_str(&yaml).expect("deserialize");
    assert_eq!(decoded, map);
}

#[test]
fn values_round_trip_json() {
    let map = sample_map();
    let json = serde_json::to_string_pretty(&map).expect("serialize");
    let decoded: ParamMap = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(decoded, map);
}

#[test]
fn untagged_scalars_keep_their_types() {
    let decoded: ParamMap =
        serde_yaml::from_str("cutoff: 1.0\natom: Fe\nrelax: true\nsteps: 200\n")
            .expect("deserialize");

    assert_eq!(decoded["cutoff"], ParamValue::Scalar(Scalar::Float(1.0)));
    assert_eq!(
        decoded["atom"],
        ParamValue::Scalar(Scalar::Text("Fe".to_string()))
    );
    assert_eq!(decoded["relax"], ParamValue::Scalar(Scalar::Bool(true)));
    assert_eq!(decoded["steps"], ParamValue::Scalar(Scalar::Int(200)));
}

#[test]
fn serialized_yaml_reads_as_plain_scalars() {
    let map = sample_map();
    let yaml = serde_yaml::to_string(&map).expect("serialize");
    assert!(yaml.contains("test_int: 12345"));
    assert!(yaml.contains("test_bool: true"));
    assert!(!yaml.contains("Scalar"));
}

#[test]
fn map_preserves_insertion_order() {
    let map = sample_map();
    let keys: Vec<&str> = map.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec![
            "test_float",
            "test_int",
            "test_bool",
            "test_string",
            "test_list"
        ]
    );
}
