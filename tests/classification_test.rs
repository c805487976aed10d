//! End-to-end classification tests
//!
//! Encrypts a known English plaintext with each cipher family and checks
//! the declared winner and the recovered parameters through the public API.

use clairvoyance::config::Calibration;
use clairvoyance::detectors::AdfgxVariant;
use clairvoyance::{analyze, AnalysisError, AnalysisOptions, AnalysisReport, Analyzer, CipherType};

/// Gettysburg Address, letters only
const GETTYSBURG: &str = "FOURSCOREANDSEVENYEARSAGOOURFATHERSBROUGHTFORTHONTHISCONTINENTANEWNATIONCONCEIVEDINLIBERTY\
    ANDDEDICATEDTOTHEPROPOSITIONTHATALLMENARECREATEDEQUALNOWWEAREENGAGEDINAGREATCIVILWARTESTIN\
    GWHETHERTHATNATIONORANYNATIONSOCONCEIVEDANDSODEDICATEDCANLONGENDUREWEAREMETONAGREATBATTLEF\
    IELDOFTHATWARWEHAVECOMETODEDICATEAPORTIONOFTHATFIELDASAFINALRESTINGPLACEFORTHOSEWHOHEREGAV\
    ETHEIRLIVESTHATTHATNATIONMIGHTLIVEITISALTOGETHERFITTINGANDPROPERTHATWESHOULDDOTHISBUTINALA\
    RGERSENSEWECANNOTDEDICATEWECANNOTCONSECRATEWECANNOTHALLOWTHISGROUNDTHEBRAVEMENLIVINGANDDEA\
    DWHOSTRUGGLEDHEREHAVECONSECRATEDITFARABOVEOURPOORPOWERTOADDORDETRACTTHEWORLDWILLLITTLENOTE\
    NORLONGREMEMBERWHATWESAYHEREBUTITCANNEVERFORGETWHATTHEYDIDHEREITISFORUSTHELIVINGRATHERTOBE\
    DEDICATEDHERETOTHEUNFINISHEDWORKWHICHTHEYWHOFOUGHTHEREHAVETHUSFARSONOBLYADVANCEDITISRATHER\
    FORUSTOBEHEREDEDICATEDTOTHEGREATTASKREMAININGBEFOREUSTHATFROMTHESEHONOREDDEADWETAKEINCREAS\
    EDDEVOTIONTOTHATCAUSEFORWHICHTHEYGAVETHELASTFULLMEASUREOFDEVOTIONTHATWEHEREHIGHLYRESOLVETH\
    ATTHESEDEADSHALLNOTHAVEDIEDINVAINTHATTHISNATIONUNDERGODSHALLHAVEANEWBIRTHOFFREEDOMANDTHATG\
    OVERNMENTOFTHEPEOPLEBYTHEPEOPLEFORTHEPEOPLESHALLNOTPERISHFROMTHEEARTH";

fn shift(c: u8, by: u32) -> char {
    (b'A' + (((c - b'A') as u32 + by) % 26) as u8) as char
}

fn caesar(plain: &str, s: u32) -> String {
    plain.bytes().map(|c| shift(c, s)).collect()
}

fn affine(plain: &str, a: u32, b: u32) -> String {
    plain
        .bytes()
        .map(|c| (b'A' + ((a * (c - b'A') as u32 + b) % 26) as u8) as char)
        .collect()
}

fn vigenere(plain: &str, key: &str) -> String {
    let key = key.as_bytes();
    plain
        .bytes()
        .enumerate()
        .map(|(i, c)| shift(c, (key[i % key.len()] - b'A') as u32))
        .collect()
}

fn substitution(plain: &str, key: &str) -> String {
    let key = key.as_bytes();
    plain.bytes().map(|c| key[(c - b'A') as usize] as char).collect()
}

fn columnar(plain: &str, key: &str) -> String {
    let key = key.as_bytes();
    let mut order: Vec<usize> = (0..key.len()).collect();
    order.sort_by_key(|&i| (key[i], i));
    let bytes = plain.as_bytes();
    order
        .into_iter()
        .flat_map(|col| bytes.iter().skip(col).step_by(key.len()).map(|&b| b as char))
        .collect()
}

fn sequential() -> Analyzer {
    Analyzer::new(AnalysisOptions::default(), Calibration::default()).with_workers(1)
}

const SUBSTITUTION_KEY: &str = "XYLKWBFZTNJRQAHVGMUOPDICSE";

// ============================================================================
// Monoalphabetic families
// ============================================================================

#[test]
fn test_hello_world_is_caesar_shift_3() {
    let report = analyze("KHOOR ZRUOG", &AnalysisOptions::default()).unwrap();
    assert_eq!(report.winner.cipher, CipherType::Caesar);
    assert_eq!(report.detector_stats.caesar_shift, Some(3));
    assert_eq!(report.text, "KHOORZRUOG");
}

#[test]
fn test_every_caesar_shift_on_300_letters() {
    let analyzer = sequential();
    for s in 1..26 {
        let report = analyzer.analyze(&caesar(&GETTYSBURG[..300], s)).unwrap();
        assert_eq!(report.winner.cipher, CipherType::Caesar, "shift {}", s);
        assert_eq!(report.detector_stats.caesar_shift, Some(s as u8));
    }
}

#[test]
fn test_affine_keys_on_400_letters() {
    let analyzer = sequential();
    for (a, b) in [(5, 8), (7, 3), (11, 19), (25, 0)] {
        let report = analyzer.analyze(&affine(&GETTYSBURG[..400], a, b)).unwrap();
        assert_eq!(report.winner.cipher, CipherType::Affine, "key ({}, {})", a, b);
        let key = report.detector_stats.affine_key.unwrap();
        assert_eq!((key.a as u32, key.b as u32), (a, b));
    }
}

#[test]
fn test_random_substitution() {
    let analyzer = sequential();
    let full = analyzer
        .analyze(&substitution(GETTYSBURG, SUBSTITUTION_KEY))
        .unwrap();
    assert_eq!(full.winner.cipher, CipherType::Substitution);

    let short = analyzer
        .analyze(&substitution(&GETTYSBURG[..300], SUBSTITUTION_KEY))
        .unwrap();
    assert_eq!(short.winner.cipher, CipherType::Substitution);
}

// ============================================================================
// Polyalphabetic and structural families
// ============================================================================

#[test]
fn test_vigenere_key_lengths_3_to_10() {
    let analyzer = sequential();
    for key in ["KEY", "LEMON", "LEMONS", "CIPHERS", "SECRETKY", "ALGORITHM", "CRYPTOGRAM"] {
        let report = analyzer.analyze(&vigenere(&GETTYSBURG[..520], key)).unwrap();
        assert_eq!(report.winner.cipher, CipherType::Vigenere, "key {}", key);
        assert_eq!(report.detector_stats.vigenere_key_length, Some(key.len()));
    }
}

#[test]
fn test_vigenere_key_recovered_on_long_text() {
    let report = sequential().analyze(&vigenere(GETTYSBURG, "LEMON")).unwrap();
    assert_eq!(report.detector_stats.vigenere_key.as_deref(), Some("LEMON"));
}

#[test]
fn test_columnar_transposition() {
    let report = sequential().analyze(&columnar(GETTYSBURG, "ZEBRAS")).unwrap();
    assert_eq!(report.winner.cipher, CipherType::Transposition);
}

#[test]
fn test_adfgx_and_adfgvx() {
    let adfgx = "FDGAAXAFXAXDAAGGADAXGAXADXAXXGADAXDFGDXAXFXDAXXDFAXAXAXDGXGF";
    let report = sequential().analyze(adfgx).unwrap();
    assert_eq!(report.winner.cipher, CipherType::Adfgx);
    assert_eq!(report.detector_stats.adfgx_variant, Some(AdfgxVariant::Adfgx));
    assert!((report.raw_evidence.get(CipherType::Adfgx).unwrap() - 0.9).abs() < 1e-12);

    let adfgvx = "GVGFFDDXDAVFVGFXGFVAAVGDFDGGAXAVVFFXFVGVGAAFGXXAAXXFXVXGFXGX";
    let report = sequential().analyze(adfgvx).unwrap();
    assert_eq!(report.winner.cipher, CipherType::Adfgx);
    assert_eq!(report.detector_stats.adfgx_variant, Some(AdfgxVariant::Adfgvx));
    assert!((report.raw_evidence.get(CipherType::Adfgx).unwrap() - 1.0).abs() < 1e-12);
}

#[test]
fn test_odd_length_adfgx_alphabet_scores_zero() {
    let report = sequential().analyze("ADFGXADFGXA").unwrap();
    assert_eq!(report.raw_evidence.get(CipherType::Adfgx), Some(0.0));
    assert_eq!(report.detector_stats.adfgx_variant, None);
}

// ============================================================================
// Contract
// ============================================================================

#[test]
fn test_empty_and_letter_free_input() {
    for input in ["", "   ", "1234 !?", "ÄÖÜ 42"] {
        let err = analyze(input, &AnalysisOptions::default()).unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyInput), "input {:?}", input);
        assert!(!err.to_string().is_empty());
    }
}

#[test]
fn test_probabilities_sum_to_one() {
    let analyzer = sequential();
    for text in [
        "KHOOR ZRUOG".to_string(),
        caesar(GETTYSBURG, 9),
        vigenere(GETTYSBURG, "KEY"),
        columnar(&GETTYSBURG[..200], "CAB"),
    ] {
        let report = analyzer.analyze(&text).unwrap();
        let total = report.probabilities.total();
        assert!((total - 1.0).abs() < 1e-9, "total {}", total);
        for (_, &p) in report.probabilities.iter() {
            assert!(p > 0.0 && p < 1.0);
        }
        assert_eq!(report.ranking()[0].0, report.winner.cipher);
    }
}

#[test]
fn test_length_bias_monotonicity() {
    let text = caesar(&GETTYSBURG[..18], 5);
    let biased = analyze(&text, &AnalysisOptions::default()).unwrap();
    let unbiased = analyze(
        &text,
        &AnalysisOptions {
            length_bias: false,
            ..AnalysisOptions::default()
        },
    )
    .unwrap();
    let caesar_share = |r: &AnalysisReport| r.probabilities.get(CipherType::Caesar).unwrap();
    let vigenere_share = |r: &AnalysisReport| r.probabilities.get(CipherType::Vigenere).unwrap();
    assert!(caesar_share(&biased) > caesar_share(&unbiased));
    assert!(vigenere_share(&biased) < vigenere_share(&unbiased));
}

#[test]
fn test_disabled_detectors_absent() {
    let options = AnalysisOptions {
        caesar_affine: false,
        ..AnalysisOptions::default()
    };
    let report = analyze("KHOOR ZRUOG", &options).unwrap();
    assert!(report.evidence.get(CipherType::Caesar).is_none());
    assert!(report.evidence.get(CipherType::Affine).is_none());
    assert!(report.detector_stats.caesar_shift.is_none());
    assert_ne!(report.winner.cipher, CipherType::Caesar);
}

#[test]
fn test_temperature_sharpens_distribution() {
    let text = caesar(GETTYSBURG, 4);
    let cool = analyze(
        &text,
        &AnalysisOptions {
            temperature: 0.2,
            ..AnalysisOptions::default()
        },
    )
    .unwrap();
    let warm = analyze(
        &text,
        &AnalysisOptions {
            temperature: 2.0,
            ..AnalysisOptions::default()
        },
    )
    .unwrap();
    assert_eq!(cool.winner.cipher, warm.winner.cipher);
    assert!(cool.winner.probability > warm.winner.probability);
}

#[test]
fn test_reproducible_across_worker_counts() {
    let text = vigenere(GETTYSBURG, "CIPHERS");
    let one = sequential().analyze(&text).unwrap();
    let many = Analyzer::new(AnalysisOptions::default(), Calibration::default())
        .with_workers(7)
        .analyze(&text)
        .unwrap();
    assert_eq!(one.evidence, many.evidence);
    assert_eq!(one.probabilities, many.probabilities);
    assert_eq!(one.detector_stats, many.detector_stats);
}
