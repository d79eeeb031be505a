//! Unit tests for the guide command.

use super::helpers::{utf8_root, write_utf8};
use super::*;
use crate::guide::{GuideArgs, NO_INSTRUCTION_MESSAGE, parse_position, prompts_along, run_guide_with};
use camino::Utf8PathBuf;
use clap::Parser;
use evacroute_core::test_support::FixedHazardAnalyzer;
use evacroute_core::{Candidate, Instruction, RouteScorer};
use geo::Coord;
use rstest::{fixture, rstest};
use tempfile::TempDir;

/// East, then north, ending at the safe zone.
fn ridge_path() -> Vec<Coord<f64>> {
    vec![
        Coord { x: 0.0, y: 0.0 },
        Coord { x: 0.001, y: 0.0 },
        Coord { x: 0.001, y: 0.001 },
    ]
}

/// A ranking saved the way `evaluate --format json` writes it.
#[fixture]
fn saved_ranking() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let path = utf8_root(&tmp).join("ranking.json");
    let straight_end = Coord { x: 0.0, y: 0.002 };
    let candidates = vec![
        Candidate::new("Ridge", Coord { x: 0.001, y: 0.001 }, ridge_path(), 220.0, 160.0),
        Candidate::new(
            "Plaza",
            straight_end,
            vec![Coord { x: 0.0, y: 0.0 }, straight_end],
            900.0,
            700.0,
        ),
    ];
    let ranking = RouteScorer::new(FixedHazardAnalyzer::clear())
        .evaluate(Coord { x: 0.0, y: 0.0 }, candidates, &[])
        .expect("scoring succeeds");
    let json = serde_json::to_string_pretty(&ranking).expect("ranking serialises");
    write_utf8(&path, json.as_bytes());
    (tmp, path)
}

fn guide_args(ranking: Utf8PathBuf, rank: u16, positions: Vec<Coord<f64>>) -> GuideArgs {
    GuideArgs {
        ranking,
        rank,
        positions,
    }
}

fn run_to_string(args: &GuideArgs) -> Result<String, CliError> {
    let mut stdout = Vec::new();
    run_guide_with(args, &mut stdout)?;
    Ok(String::from_utf8(stdout).expect("stdout utf-8"))
}

#[rstest]
#[case::southern_hemisphere("-0.314,-78.445", Coord { x: -78.445, y: -0.314 })]
#[case::padded(" 12.5 , 3 ", Coord { x: 3.0, y: 12.5 })]
fn parses_lat_lon_pairs(#[case] raw: &str, #[case] expected: Coord<f64>) {
    assert_eq!(parse_position(raw), Ok(expected));
}

#[rstest]
#[case::no_comma("-0.314")]
#[case::not_a_number("north,-78.445")]
#[case::latitude_out_of_range("91,0")]
#[case::longitude_out_of_range("0,-181")]
fn rejects_malformed_positions(#[case] raw: &str) {
    assert!(parse_position(raw).is_err(), "{raw:?} should be rejected");
}

#[rstest]
fn parses_repeated_negative_positions() {
    let cli = Cli::try_parse_from([
        "evacroute",
        "guide",
        "--ranking",
        "ranking.json",
        "--position",
        "-0.314,-78.445",
        "--position",
        "-0.313,-78.444",
    ])
    .expect("arguments parse");

    let Command::Guide(args) = cli.command else {
        panic!("expected the guide command");
    };
    assert_eq!(args.rank, 1);
    assert_eq!(
        args.positions,
        [Coord { x: -78.445, y: -0.314 }, Coord { x: -78.444, y: -0.313 }]
    );
}

#[rstest]
fn rejects_rank_zero() {
    let result = Cli::try_parse_from([
        "evacroute",
        "guide",
        "--ranking",
        "ranking.json",
        "--rank",
        "0",
        "--position",
        "0,0",
    ]);
    assert!(result.is_err());
}

#[rstest]
fn drops_repeated_prompts() {
    let start = Coord { x: 0.0, y: 0.0 };
    let end = Coord { x: 0.001, y: 0.001 };
    assert_eq!(
        prompts_along(&ridge_path(), &[start, start, end, end]),
        [Instruction::TurnLeft, Instruction::Arrived]
    );
}

#[rstest]
fn guides_along_the_best_route(saved_ranking: (TempDir, Utf8PathBuf)) {
    let (_tmp, path) = saved_ranking;
    let args = guide_args(
        path,
        1,
        vec![
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 0.001, y: 0.001 },
        ],
    );

    let output = run_to_string(&args).expect("guide succeeds");

    assert_eq!(
        output,
        "Route to Ridge\nTurn left\nYou have arrived at the safe zone\n"
    );
}

#[rstest]
fn reports_positions_without_a_prompt(saved_ranking: (TempDir, Utf8PathBuf)) {
    let (_tmp, path) = saved_ranking;
    // Plaza is a single segment, so a walker short of its end gets no prompt.
    let args = guide_args(path, 2, vec![Coord { x: 0.0, y: 0.0005 }]);

    let output = run_to_string(&args).expect("guide succeeds");

    assert_eq!(output, format!("Route to Plaza\n{NO_INSTRUCTION_MESSAGE}\n"));
}

#[rstest]
fn rejects_ranks_past_the_end(saved_ranking: (TempDir, Utf8PathBuf)) {
    let (_tmp, path) = saved_ranking;
    let args = guide_args(path, 3, vec![Coord { x: 0.0, y: 0.0 }]);

    let err = run_to_string(&args).expect_err("rank 3 is out of range");

    assert!(
        matches!(err, CliError::RankOutOfRange { rank: 3, available: 2 }),
        "unexpected error: {err:?}"
    );
}

#[rstest]
fn rejects_files_that_are_not_rankings() {
    let tmp = TempDir::new().expect("tempdir");
    let path = utf8_root(&tmp).join("zones.geojson");
    write_utf8(&path, br#"{ "type": "FeatureCollection", "features": [] }"#);
    let args = guide_args(path, 1, vec![Coord { x: 0.0, y: 0.0 }]);

    let err = run_to_string(&args).expect_err("not a ranking");

    assert!(
        matches!(err, CliError::ParseRanking { .. }),
        "unexpected error: {err:?}"
    );
}

#[rstest]
fn reports_missing_ranking_files() {
    let tmp = TempDir::new().expect("tempdir");
    let args = guide_args(
        utf8_root(&tmp).join("absent.json"),
        1,
        vec![Coord { x: 0.0, y: 0.0 }],
    );

    let err = run_to_string(&args).expect_err("file is missing");

    assert!(
        matches!(err, CliError::ReadRanking { .. }),
        "unexpected error: {err:?}"
    );
}
