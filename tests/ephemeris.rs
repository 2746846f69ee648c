#[cfg(test)]
mod test {
    use signalsim_config::prelude::*;
    use std::collections::BTreeSet;
    use std::str::FromStr;

    fn resource(path: &str) -> String {
        env!("CARGO_MANIFEST_DIR").to_owned() + "/test_resources/NAV/" + path
    }

    fn gpst(y: i32, m: u8, d: u8, hh: u8, mm: u8) -> Epoch {
        Epoch::from_gregorian(y, m, d, hh, mm, 0, 0, TimeScale::GPST).to_time_scale(TimeScale::UTC)
    }

    #[test]
    fn test_parser() {
        let test_resources = env!("CARGO_MANIFEST_DIR").to_owned() + "/test_resources/NAV/";
        for revision in ["V2", "V3", "V4"] {
            let data_path = std::path::PathBuf::from(test_resources.to_owned() + revision);
            for entry in std::fs::read_dir(data_path).unwrap() {
                let entry = entry.unwrap();
                let path = entry.path();
                let name = entry.file_name().to_str().unwrap().to_string();
                if name.starts_with('.') {
                    continue; // not a test resource
                }
                if name.ends_with(".gz") && !cfg!(feature = "flate2") {
                    continue; // do not run in this build configuration
                }
                println!("Parsing file: \"{}\"", path.display());
                let file = EphemerisFile::parse(&path);
                assert!(file.is_ok(), "failed to parse {}: {:?}", name, file.err());
                let file = file.unwrap();
                assert_eq!(file.status(), ParseStatus::Parsed);
                assert!(file.records() > 0);
                assert!(file.start() < file.end());
                assert!(file.satellites().count() > 0);
                assert_eq!(file.path(), path.as_path());
            }
        }
    }

    #[test]
    fn v2_gps() {
        let file = EphemerisFile::parse(resource("V2/brdc0010.24n")).unwrap();
        assert_eq!(file.version(), Version::new(2, 11));
        assert_eq!(file.header.constellation, Constellation::GPS);
        assert_eq!(file.program(), Some("CCRINEXN V1.6.0 UX"));
        assert_eq!(file.leap_seconds(), Some(18));
        assert_eq!(file.records(), 2);

        let satellites = file.satellites().collect::<Vec<_>>();
        assert_eq!(
            satellites,
            vec![SV::from_str("G01").unwrap(), SV::from_str("G02").unwrap()]
        );
        assert_eq!(file.constellations(), BTreeSet::from([Constellation::GPS]));

        // 2 hours before the first TOC, 4 hours after the last one
        assert_eq!(file.start(), gpst(2024, 1, 1, 0, 0));
        assert_eq!(file.end(), gpst(2024, 1, 2, 0, 0));
        assert_eq!(file.window().duration(), Duration::from_hours(24.0));
    }

    #[test]
    fn v2_glonass() {
        let file = EphemerisFile::parse(resource("V2/brdc0010.24g")).unwrap();
        assert_eq!(file.header.constellation, Constellation::Glonass);
        assert_eq!(file.records(), 2);
        // same satellite twice
        assert_eq!(file.satellites().count(), 1);
        assert_eq!(
            file.start(),
            Epoch::from_gregorian_utc_hms(2023, 12, 31, 22, 15, 0)
        );
        assert_eq!(file.end(), Epoch::from_gregorian_utc_hms(2024, 1, 1, 15, 45, 0));
    }

    #[test]
    fn v3_mixed() {
        let file = EphemerisFile::parse(resource("V3/MIXD0010.24P")).unwrap();
        assert_eq!(file.version(), Version::new(3, 4));
        assert_eq!(file.header.constellation, Constellation::Mixed);
        assert_eq!(file.program(), Some("BCEmerge"));
        assert_eq!(file.records(), 4);
        assert_eq!(
            file.constellations(),
            BTreeSet::from([
                Constellation::GPS,
                Constellation::Glonass,
                Constellation::BeiDou,
                Constellation::Galileo,
            ])
        );
        assert_eq!(file.start(), gpst(2024, 1, 1, 0, 0));
        assert_eq!(file.end(), Epoch::from_gregorian_utc_hms(2024, 1, 1, 16, 15, 0));
    }

    #[test]
    #[cfg(feature = "flate2")]
    fn v3_gzip() {
        let plain = EphemerisFile::parse(resource("V3/MIXD0010.24P")).unwrap();
        let gzip = EphemerisFile::parse(resource("V3/MIXD0010.24P.gz")).unwrap();
        assert_eq!(plain.window(), gzip.window());
        assert_eq!(plain.records(), gzip.records());
        assert_eq!(plain.constellations(), gzip.constellations());
    }

    #[test]
    fn v4_frames() {
        let file = EphemerisFile::parse(resource("V4/BRD400DLR_S_20240010000_01D_MN.rnx")).unwrap();
        assert_eq!(file.version(), Version::new(4, 1));
        // STO and ION frames do not contribute
        assert_eq!(file.records(), 2);
        assert_eq!(
            file.constellations(),
            BTreeSet::from([Constellation::GPS, Constellation::Galileo])
        );
        assert_eq!(file.start(), gpst(2023, 12, 31, 22, 0));
    }

    #[test]
    fn invalid_files() {
        for (name, kind) in [
            ("INVALID/OBS0010.24O", FailureKind::UnsupportedFormat),
            ("INVALID/garbage.rnx", FailureKind::UnsupportedFormat),
            ("INVALID/header_only.rnx", FailureKind::UnsupportedFormat),
            ("INVALID/V5_0010.24P", FailureKind::UnsupportedFormat),
            ("INVALID/missing.rnx", FailureKind::IoFailure),
        ] {
            let e = EphemerisFile::parse(resource(name)).unwrap_err();
            assert_eq!(e.kind(), kind, "{}: {}", name, e);
        }

        match EphemerisFile::parse(resource("INVALID/OBS0010.24O")) {
            Err(ParsingError::NonNavigationFile(t)) => assert_eq!(t, "OBSERVATION DATA"),
            other => panic!("unexpected result {:?}", other),
        }
        assert!(matches!(
            EphemerisFile::parse(resource("INVALID/header_only.rnx")),
            Err(ParsingError::NoEphemeris)
        ));
        assert!(matches!(
            EphemerisFile::parse(resource("INVALID/garbage.rnx")),
            Err(ParsingError::MissingEndOfHeader)
        ));
    }
}
