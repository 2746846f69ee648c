#[cfg(test)]
mod test {
    use signalsim_config::prelude::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    fn config(name: &str) -> String {
        env!("CARGO_MANIFEST_DIR").to_owned() + "/test_resources/CONFIG/" + name
    }

    fn sv(s: &str) -> SV {
        SV::from_str(s).unwrap()
    }

    #[test]
    fn gps_static() {
        let doc = ConfigurationDocument::load(config("gps_static.json")).unwrap();
        assert_eq!(doc.basic().description(), "Static GPS L1 receiver");
        assert_eq!(doc.basic().comment(), "reference station");
        assert_eq!(doc.ephemeris().len(), 1);

        let source = doc.ephemeris().iter().next().unwrap();
        assert_eq!(source.kind, EphemerisKind::RINEX);
        assert_eq!(source.name, "../NAV/V2/brdc0010.24n");

        // week 2295, TOW 129618 s: monday 12:00:18 GPST
        assert_eq!(doc.time().kind(), TimeType::GPS);
        assert_eq!(
            doc.time().start(),
            Some(Epoch::from_gregorian_utc_hms(2024, 1, 1, 12, 0, 0))
        );
        assert_eq!(doc.time().duration_seconds(), 3600.0);

        assert_eq!(doc.trajectory().mode(), TrajectoryMode::Static);
        assert_eq!(doc.trajectory().name(), "rooftop");
        match doc.trajectory().position() {
            Position::Lla {
                latitude,
                longitude,
                altitude,
            } => {
                assert_eq!(latitude, 31.2304);
                assert_eq!(longitude, 121.4737);
                assert_eq!(altitude, 20.0);
            },
            other => panic!("unexpected position {:?}", other),
        }

        assert_eq!(doc.signals().len(), 1);
        assert!(doc.signals().is_selected(Signal::L1CA));
        assert!(!doc.signals().is_selected(Signal::L5));

        let power = doc.power();
        assert_eq!(power.cn0(sv("G03")), 40.0);
        assert_eq!(power.cn0(sv("G07")), 40.0);
        assert_eq!(power.cn0(sv("G05")), 45.0);

        assert_eq!(doc.masking().elevation_mask(), 10.0);
        assert!(doc.masking().is_masked(sv("G12")));
        assert!(!doc.masking().is_masked(sv("G13")));

        assert_eq!(doc.output().kind(), OutputKind::IfData);
        assert_eq!(doc.output().format(), OutputFormat::IQ8);
        assert_eq!(doc.output().name(), "static_gps.bin");
        assert!(doc.is_complete());
    }

    #[test]
    fn mixed_dynamic() {
        let doc = ConfigurationDocument::load(config("mixed_dynamic.json")).unwrap();
        assert_eq!(doc.ephemeris().len(), 2);
        assert_eq!(doc.time().kind(), TimeType::UTC);
        assert_eq!(
            doc.time().end(),
            Some(Epoch::from_gregorian_utc_hms(2024, 1, 1, 13, 0, 0))
        );

        let trajectory = doc.trajectory();
        assert_eq!(trajectory.mode(), TrajectoryMode::Dynamic);
        assert_eq!(trajectory.segments().len(), 3);
        assert_eq!(trajectory.segments()[1].kind(), MotionType::HorizontalTurn);
        assert_eq!(trajectory.segments()[1].rate(), Some(1.5));
        assert_eq!(trajectory.total_duration(), 7200.0);

        // legacy km/h speed unit
        match trajectory.velocity() {
            Velocity::Scu { speed, course, .. } => {
                assert!((speed - 10.0).abs() < 1.0E-9);
                assert_eq!(course, 90.0);
            },
            other => panic!("unexpected velocity {:?}", other),
        }

        let constellations = doc.signals().constellations();
        assert_eq!(constellations.len(), 3);
        assert!(doc.power().elevation_adjust());
        assert_eq!(doc.output().format(), OutputFormat::IQ4);
        assert_eq!(doc.output().sample_frequency(), 16.368);
        assert_eq!(doc.output().interval(), 1.0);
    }

    #[test]
    fn serialization_is_stable() {
        for name in ["gps_static.json", "mixed_dynamic.json"] {
            let doc = ConfigurationDocument::load(config(name)).unwrap();
            let content = doc.to_json_string().unwrap();
            let parsed = ConfigurationDocument::from_json_str(&content).unwrap();
            assert_eq!(parsed, doc, "{}", name);

            // second generation is identical to the first one
            assert_eq!(parsed.to_json_string().unwrap(), content, "{}", name);
        }
    }

    #[test]
    fn file_roundtrip() {
        let doc = ConfigurationDocument::load(config("mixed_dynamic.json")).unwrap();
        let path = std::env::temp_dir().join("signalsim-mixed_dynamic-copy.json");
        doc.save(&path).unwrap();
        let copy = ConfigurationDocument::load(&path).unwrap();
        assert_eq!(copy, doc);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn emitted_contract() {
        let doc = ConfigurationDocument::load(config("gps_static.json")).unwrap();
        let value = doc.to_json().unwrap();

        // complete signal catalogue, with enable flags
        let select = value["signals"]["systemSelect"].as_array().unwrap();
        assert_eq!(select.len(), Signal::iter().count());
        let enabled = select
            .iter()
            .filter(|entry| entry["enable"].as_bool() == Some(true))
            .count();
        assert_eq!(enabled, 1);

        assert_eq!(value["time"]["week"], 2295);
        assert_eq!(value["time"]["second"], 129618.0);
        assert_eq!(value["power"]["signalPower"][0]["system"], "GPS");
        assert_eq!(
            value["power"]["signalPower"][0]["svid"],
            serde_json::json!([3, 7])
        );
        assert_eq!(value["masking"]["maskOut"][0]["svid"], serde_json::json!([12]));
        assert_eq!(value["output"]["type"], "IFdata");
    }

    #[test]
    fn templates() {
        for template in Template::iter() {
            let doc = template.document();
            let content = doc.to_json_string().unwrap();
            let parsed = ConfigurationDocument::from_json_str(&content).unwrap();
            assert_eq!(parsed, doc, "{}", template);

            let alias = template.to_string();
            assert_eq!(Template::from_str(&alias).unwrap(), template);
        }
        assert_eq!(Template::from_str("urban").unwrap(), Template::Urban);
    }

    #[test]
    fn invalid_documents() {
        let e = ConfigurationDocument::from_json_str("[]").unwrap_err();
        assert_eq!(e.field, "document");

        let content = std::fs::read_to_string(config("gps_static.json")).unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&content).unwrap();
        value["masking"]["maskOut"][0]["system"] = serde_json::json!("SBAS");
        let e = ConfigurationDocument::from_json(&value).unwrap_err();
        assert_eq!(e.field, "masking.maskOut.system");

        assert!(ConfigurationDocument::load(config("missing.json")).is_err());
    }

    #[test]
    fn sub_second_start_is_preserved() {
        let start = Epoch::from_gregorian_utc(2024, 12, 31, 23, 59, 59, 123_456_789);
        let mut doc = ConfigurationDocument::load(config("gps_static.json")).unwrap();
        doc.time_mut().set_start(start);
        for kind in TimeType::iter() {
            doc.time_mut().set_kind(kind);
            let parsed = ConfigurationDocument::from_json(&doc.to_json().unwrap()).unwrap();
            assert_eq!(parsed.time().start(), Some(start), "{}", kind);
            assert_eq!(parsed, doc, "{}", kind);
        }
    }

    #[test]
    fn start_time_out_of_range() {
        let content = std::fs::read_to_string(config("gps_static.json")).unwrap();
        let base: serde_json::Value = serde_json::from_str(&content).unwrap();

        for (time, field) in [
            (
                serde_json::json!({"type": "GLONASS", "leapYear": i32::MAX, "day": 1, "second": 0.0}),
                "time.leapYear",
            ),
            (
                serde_json::json!({"type": "GLONASS", "leapYear": i32::MIN, "day": 1, "second": 0.0}),
                "time.leapYear",
            ),
            (
                serde_json::json!({"type": "GLONASS", "leapYear": 2023, "day": 366, "second": 0.0}),
                "time.leapYear",
            ),
            (
                serde_json::json!({"type": "GLONASS", "leapYear": 2024, "day": 1, "second": 86400.0}),
                "time.second",
            ),
            (
                serde_json::json!({"type": "GPS", "week": u32::MAX, "second": 0.0}),
                "time.week",
            ),
            (
                serde_json::json!({"type": "Galileo", "week": 1271, "second": 604800.0}),
                "time.second",
            ),
            (
                serde_json::json!({"type": "UTC", "year": i32::MAX, "month": 1, "day": 1,
                    "hour": 0, "minute": 0, "second": 0.0}),
                "time",
            ),
        ] {
            let mut value = base.clone();
            value["time"] = time;
            value["time"]["duration"] = serde_json::json!(60.0);
            let e = ConfigurationDocument::from_json(&value).unwrap_err();
            assert_eq!(e.field, field, "{}", value["time"]);
        }

        // a leap year has a 366th day
        let mut value = base.clone();
        value["time"] =
            serde_json::json!({"type": "GLONASS", "leapYear": 2024, "day": 366, "second": 0.5, "duration": 60.0});
        let doc = ConfigurationDocument::from_json(&value).unwrap();
        assert_eq!(
            doc.time().start(),
            Some(Epoch::from_gregorian_utc(2024, 12, 31, 0, 0, 0, 500_000_000))
        );
    }
}
