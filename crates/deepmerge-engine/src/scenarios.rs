//! End-to-end merge scenarios over whole documents.

use deepmerge_tree::Tree;
use serde_json::{json, Value};

use crate::{merge_documents, merge_with_config, MergeConfig, MergeError};

struct Case {
    name: &'static str,
    src: Value,
    dest: Value,
    config: MergeConfig,
    want: Value,
}

fn bang() -> MergeConfig {
    MergeConfig::deeper_merge_bang()
}

fn ko() -> MergeConfig {
    bang().with_default_knockout_prefix()
}

fn ko_split() -> MergeConfig {
    ko().with_unpack_arrays(",")
}

fn run_cases(cases: Vec<Case>) {
    for case in cases {
        let src = Tree::from(case.src).into_mapping().unwrap();
        let dest = Tree::from(case.dest).into_mapping().unwrap();
        let got = merge_documents(src, dest, &case.config)
            .unwrap_or_else(|e| panic!("{}: unexpected error {e}", case.name));
        assert_eq!(Tree::Mapping(got), Tree::from(case.want), "{}", case.name);
    }
}

#[test]
fn preset_configurations() {
    run_cases(vec![
        Case {
            name: "knockout preset unions integers",
            src: json!({"id": [3, 4, 5]}),
            dest: json!({"id": [1, 2, 3]}),
            config: MergeConfig::deeper_merge_ko(),
            want: json!({"id": [1, 2, 3, 4, 5]}),
        },
        Case {
            name: "bang preset unions integers",
            src: json!({"id": [3, 4, 5]}),
            dest: json!({"id": [1, 2, 3]}),
            config: bang(),
            want: json!({"id": [1, 2, 3, 4, 5]}),
        },
        Case {
            name: "preserving preset keeps sequence over string",
            src: json!({"id": "xxx"}),
            dest: json!({"id": [1, 2, 3]}),
            config: MergeConfig::deeper_merge(),
            want: json!({"id": [1, 2, 3]}),
        },
    ]);
}

#[test]
fn basic_merges() {
    run_cases(vec![
        Case {
            name: "scalar into blank mapping",
            src: json!({"id": "2"}),
            dest: json!({}),
            config: ko_split(),
            want: json!({"id": "2"}),
        },
        Case {
            name: "nested sequence into blank mapping",
            src: json!({"region": {"id": ["227", "2"]}}),
            dest: json!({}),
            config: ko_split(),
            want: json!({"region": {"id": ["227", "2"]}}),
        },
        Case {
            name: "empty source",
            src: json!({}),
            dest: json!({"property": ["2", "4"]}),
            config: bang(),
            want: json!({"property": ["2", "4"]}),
        },
        Case {
            name: "empty destination",
            src: json!({"property": ["2", "4"]}),
            dest: json!({}),
            config: bang(),
            want: json!({"property": ["2", "4"]}),
        },
        Case {
            name: "string overwrite",
            src: json!({"name": "value"}),
            dest: json!({"name": "value1"}),
            config: bang(),
            want: json!({"name": "value"}),
        },
        Case {
            name: "sequences union",
            src: json!({"property": ["1", "3"]}),
            dest: json!({"property": ["2", "4"]}),
            config: bang(),
            want: json!({"property": ["2", "4", "1", "3"]}),
        },
        Case {
            name: "sequences overwrite",
            src: json!({"property": ["1", "3"]}),
            dest: json!({"property": ["2", "4"]}),
            config: bang().with_overwrite_arrays(true),
            want: json!({"property": ["1", "3"]}),
        },
        Case {
            name: "sequences sorted",
            src: json!({"property": ["1", "3"]}),
            dest: json!({"property": ["2", "4"]}),
            config: bang().with_sort_merged_arrays(true),
            want: json!({"property": ["1", "2", "3", "4"]}),
        },
        Case {
            name: "nested sequences keep destination order",
            src: json!({"property": {"bedroom_count": ["1", "2"], "bathroom_count": ["1", "4+"]}}),
            dest: json!({"property": {"bedroom_count": ["3", "2"], "bathroom_count": ["2"]}}),
            config: bang(),
            want: json!({"property": {"bedroom_count": ["3", "2", "1"], "bathroom_count": ["2", "1", "4+"]}}),
        },
        Case {
            name: "keys that look like sequences",
            src: json!({"[\"1\", \"2\", \"3\"]": ["1", "2"]}),
            dest: json!({"[\"4\", \"5\"]": ["3"]}),
            config: bang(),
            want: json!({"[\"1\", \"2\", \"3\"]": ["1", "2"], "[\"4\", \"5\"]": ["3"]}),
        },
        Case {
            name: "scalars into blank mapping with knockout enabled",
            src: json!({"action": "browse", "controller": "results"}),
            dest: json!({}),
            config: ko_split(),
            want: json!({"action": "browse", "controller": "results"}),
        },
    ]);
}

#[test]
fn unmergeable_values() {
    let src_seq = json!({"property": {"bedroom_count": ["1", "2"], "bathroom_count": ["1", "4+"]}});
    let dest_str = json!({"property": {"bedroom_count": "3", "bathroom_count": ["2"]}});
    let src_str = json!({"property": {"bedroom_count": "3", "bathroom_count": ["1", "4+"]}});
    let dest_seq = json!({"property": {"bedroom_count": ["1", "2"], "bathroom_count": ["2"]}});
    let src_map = json!({"property": {"bedroom_count": {"king_bed": 3, "queen_bed": 1}, "bathroom_count": ["1", "4+"]}});
    let layered = json!({"property": {"bedroom_count": {"king_bed": [2], "queen_bed": [4]}, "bathroom_count": ["2"]}});

    run_cases(vec![
        Case {
            name: "sequence overwrites string",
            src: src_seq.clone(),
            dest: dest_str.clone(),
            config: bang(),
            want: json!({"property": {"bedroom_count": ["1", "2"], "bathroom_count": ["2", "1", "4+"]}}),
        },
        Case {
            name: "sequence does not overwrite string when preserving",
            src: src_seq,
            dest: dest_str,
            config: bang().with_preserve_unmergeables(true),
            want: json!({"property": {"bedroom_count": "3", "bathroom_count": ["2", "1", "4+"]}}),
        },
        Case {
            name: "string overwrites sequence",
            src: src_str.clone(),
            dest: dest_seq.clone(),
            config: bang(),
            want: json!({"property": {"bedroom_count": "3", "bathroom_count": ["2", "1", "4+"]}}),
        },
        Case {
            name: "string does not overwrite sequence when preserving",
            src: src_str,
            dest: dest_seq.clone(),
            config: bang().with_preserve_unmergeables(true),
            want: json!({"property": {"bedroom_count": ["1", "2"], "bathroom_count": ["2", "1", "4+"]}}),
        },
        Case {
            name: "mapping overwrites sequence",
            src: src_map.clone(),
            dest: dest_seq.clone(),
            config: bang(),
            want: json!({"property": {"bedroom_count": {"king_bed": 3, "queen_bed": 1}, "bathroom_count": ["2", "1", "4+"]}}),
        },
        Case {
            name: "mapping does not overwrite sequence when preserving",
            src: src_map,
            dest: dest_seq,
            config: bang().with_preserve_unmergeables(true),
            want: json!({"property": {"bedroom_count": ["1", "2"], "bathroom_count": ["2", "1", "4+"]}}),
        },
        Case {
            name: "string overwrites three mapping layers",
            src: json!({"property": "1"}),
            dest: layered.clone(),
            config: bang(),
            want: json!({"property": "1"}),
        },
        Case {
            name: "string does not overwrite mapping layers when preserving",
            src: json!({"property": "1"}),
            dest: layered.clone(),
            config: bang().with_preserve_unmergeables(true),
            want: layered.clone(),
        },
        Case {
            name: "one integer overwrites, the rest merge",
            src: json!({"property": {"bedroom_count": {"king_bed": 3, "queen_bed": [1]}, "bathroom_count": ["1"]}}),
            dest: layered.clone(),
            config: bang(),
            want: json!({"property": {"bedroom_count": {"king_bed": 3, "queen_bed": [4, 1]}, "bathroom_count": ["2", "1"]}}),
        },
        Case {
            name: "string overwrites nested sequence while siblings merge",
            src: json!({"property": {"bedroom_count": {"king_bed": [3], "queen_bed": [1]}, "bathroom_count": "1"}}),
            dest: layered.clone(),
            config: bang(),
            want: json!({"property": {"bedroom_count": {"king_bed": [2, 3], "queen_bed": [4, 1]}, "bathroom_count": "1"}}),
        },
        Case {
            name: "nested sequence kept when preserving while siblings merge",
            src: json!({"property": {"bedroom_count": {"king_bed": [3], "queen_bed": [1]}, "bathroom_count": "1"}}),
            dest: layered.clone(),
            config: bang().with_preserve_unmergeables(true),
            want: json!({"property": {"bedroom_count": {"king_bed": [2, 3], "queen_bed": [4, 1]}, "bathroom_count": ["2"]}}),
        },
    ]);
}

#[test]
fn layered_mappings() {
    let layered = json!({"property": {"bedroom_count": {"king_bed": [2], "queen_bed": [4]}, "bathroom_count": ["2"]}});

    run_cases(vec![
        Case {
            name: "integers overwritten by source",
            src: json!({"property": {"bedroom_count": {"king_bed": 3, "queen_bed": 1}, "bathroom_count": ["1", "4+"]}}),
            dest: json!({"property": {"bedroom_count": {"king_bed": 2, "queen_bed": 4}, "bathroom_count": ["2"]}}),
            config: bang(),
            want: json!({"property": {"bedroom_count": {"king_bed": 3, "queen_bed": 1}, "bathroom_count": ["2", "1", "4+"]}}),
        },
        Case {
            name: "integer sequences merged",
            src: json!({"property": {"bedroom_count": {"king_bed": [3], "queen_bed": [1]}, "bathroom_count": ["1", "4+"]}}),
            dest: layered.clone(),
            config: bang(),
            want: json!({"property": {"bedroom_count": {"king_bed": [2, 3], "queen_bed": [4, 1]}, "bathroom_count": ["2", "1", "4+"]}}),
        },
        Case {
            name: "incomplete source",
            src: json!({"property": {"bedroom_count": {"king_bed": [3]}, "bathroom_count": ["1"]}}),
            dest: layered.clone(),
            config: bang(),
            want: json!({"property": {"bedroom_count": {"king_bed": [2, 3], "queen_bed": [4]}, "bathroom_count": ["2", "1"]}}),
        },
        Case {
            name: "source adds a new integer key",
            src: json!({"property": {"bedroom_count": {"2": 3, "king_bed": [3]}, "bathroom_count": ["1"]}}),
            dest: layered.clone(),
            config: bang(),
            want: json!({"property": {"bedroom_count": {"2": 3, "king_bed": [2, 3], "queen_bed": [4]}, "bathroom_count": ["2", "1"]}}),
        },
        Case {
            name: "empty source leaves layers intact",
            src: json!({}),
            dest: layered.clone(),
            config: bang(),
            want: layered.clone(),
        },
        Case {
            name: "layers into empty destination",
            src: json!({"property": {"bedroom_count": {"2": 3, "king_bed": [3]}, "bathroom_count": ["1"]}}),
            dest: json!({}),
            config: bang(),
            want: json!({"property": {"bedroom_count": {"2": 3, "king_bed": [3]}, "bathroom_count": ["1"]}}),
        },
        Case {
            name: "nil elements in source sequences",
            src: json!({"property": {"bedroom_count": {"king_bed": [null], "queen_bed": [1, null]}, "bathroom_count": [null, "1"]}}),
            dest: layered.clone(),
            config: bang(),
            want: json!({"property": {"bedroom_count": {"king_bed": [2, null], "queen_bed": [4, 1, null]}, "bathroom_count": ["2", null, "1"]}}),
        },
        Case {
            name: "nil elements in destination sequences",
            src: json!({"property": {"bedroom_count": {"king_bed": [3], "queen_bed": [1]}, "bathroom_count": ["1"]}}),
            dest: json!({"property": {"bedroom_count": {"king_bed": [null], "queen_bed": [4, null]}, "bathroom_count": [null, "2"]}}),
            config: bang(),
            want: json!({"property": {"bedroom_count": {"king_bed": [null, 3], "queen_bed": [4, null, 1]}, "bathroom_count": [null, "2", "1"]}}),
        },
    ]);
}

#[test]
fn extend_existing_arrays() {
    run_cases(vec![
        Case {
            name: "scalar appended to sequence",
            src: json!({"property": "4"}),
            dest: json!({"property": ["1", "2", "3"]}),
            config: bang().with_extend_existing_arrays(true),
            want: json!({"property": ["1", "2", "3", "4"]}),
        },
        Case {
            name: "mapping appended to sequence",
            src: json!({"property": {"number": "3"}}),
            dest: json!({"property": [{"number": "1"}, {"number": "2"}]}),
            config: bang().with_extend_existing_arrays(true),
            want: json!({"property": [{"number": "1"}, {"number": "2"}, {"number": "3"}]}),
        },
    ]);
}

#[test]
fn knockout_configuration_checks() {
    let src = || Tree::from(json!({"property": {"number": "3"}}));
    let dest = || Tree::from(json!({"property": [{"number": "1"}, {"number": "2"}]}));

    let rejected = [
        bang().with_knockout(""),
        bang().with_preserve_unmergeables(true).with_knockout(""),
        bang().with_preserve_unmergeables(true).with_knockout("--"),
    ];
    for config in &rejected {
        let err = merge_with_config(src(), dest(), config).unwrap_err();
        assert!(matches!(err, MergeError::InvalidConfiguration(_)), "{config:?}");
    }

    let accepted = [
        bang().with_knockout("--"),
        bang(),
        bang().with_preserve_unmergeables(true),
    ];
    for config in &accepted {
        assert!(merge_with_config(src(), dest(), config).is_ok(), "{config:?}");
    }
}

#[test]
fn unpacked_knockouts() {
    run_cases(vec![
        Case {
            name: "source split into blank mapping",
            src: json!({"property": {"bedroom_count": ["1", "2,3"]}}),
            dest: json!({}),
            config: ko_split(),
            want: json!({"property": {"bedroom_count": ["1", "2", "3"]}}),
        },
        Case {
            name: "no split without separator",
            src: json!({"property": {"bedroom_count": ["1", "2,3"]}}),
            dest: json!({}),
            config: ko(),
            want: json!({"property": {"bedroom_count": ["1", "2,3"]}}),
        },
        Case {
            name: "packed knockouts",
            src: json!({"amenity": {"id": ["--1,--2", "3,4"]}}),
            dest: json!({"amenity": {"id": ["1", "2"]}}),
            config: ko_split(),
            want: json!({"amenity": {"id": ["3", "4"]}}),
        },
        Case {
            name: "packed knockouts without separator are plain data",
            src: json!({"amenity": {"id": ["--1,--2", "3,4"]}}),
            dest: json!({"amenity": {"id": ["1", "2"]}}),
            config: ko(),
            want: json!({"amenity": {"id": ["1", "2", "3,4"]}}),
        },
        Case {
            name: "mixed packed and single knockouts",
            src: json!({"amenity": {"id": ["--1,2", "3,4", "--5", "6"]}}),
            dest: json!({"amenity": {"id": ["1", "2"]}}),
            config: ko_split(),
            want: json!({"amenity": {"id": ["2", "3", "4", "6"]}}),
        },
        Case {
            name: "packed knockouts over longer destination",
            src: json!({"amenity": {"id": ["--1,--2", "3,4", "--5", "6"]}}),
            dest: json!({"amenity": {"id": ["1", "2", "3", "4"]}}),
            config: ko_split(),
            want: json!({"amenity": {"id": ["3", "4", "6"]}}),
        },
    ]);
}

#[test]
fn naked_knockouts() {
    let region = json!({"region": {"ids": ["227", "233", "324", "230", "230"], "id": "230"}});

    run_cases(vec![
        Case {
            name: "new keys and packed source",
            src: json!({"url_regions": [], "region": {"ids": ["227,233"]}, "action": "browse", "task": "browse", "controller": "results"}),
            dest: json!({"region": {"ids": ["227"]}}),
            config: ko_split(),
            want: json!({"url_regions": [], "region": {"ids": ["227", "233"]}, "action": "browse", "task": "browse", "controller": "results"}),
        },
        Case {
            name: "naked element then value",
            src: json!({"region": {"ids": ["--", "227"], "id": "230"}}),
            dest: region.clone(),
            config: ko_split(),
            want: json!({"region": {"ids": ["227"], "id": "230"}}),
        },
        Case {
            name: "naked element then several values",
            src: json!({"region": {"ids": ["--", "227", "232", "233"], "id": "232"}}),
            dest: region.clone(),
            config: ko_split(),
            want: json!({"region": {"ids": ["227", "232", "233"], "id": "232"}}),
        },
        Case {
            name: "naked element packed with values",
            src: json!({"region": {"ids": ["--,227,232,233"], "id": "232"}}),
            dest: region.clone(),
            config: ko_split(),
            want: json!({"region": {"ids": ["227", "232", "233"], "id": "232"}}),
        },
        Case {
            name: "naked element packed with some values",
            src: json!({"region": {"ids": ["--,227,232", "233"], "id": "232"}}),
            dest: region.clone(),
            config: ko_split(),
            want: json!({"region": {"ids": ["227", "232", "233"], "id": "232"}}),
        },
        Case {
            name: "naked element packed with one value",
            src: json!({"region": {"ids": ["--,227"], "id": "230"}}),
            dest: region.clone(),
            config: ko_split(),
            want: json!({"region": {"ids": ["227"], "id": "230"}}),
        },
        Case {
            name: "naked element leaves sibling keys",
            src: json!({"query_uuid": "6386333d", "region": {"ids": ["--,227"], "id": "230"}}),
            dest: json!({"query_uuid": "6386333d", "url_regions": [], "region": {"ids": ["227", "233", "324", "230", "230"], "id": "230"}, "action": "browse"}),
            config: ko_split().enable_debug(),
            want: json!({"query_uuid": "6386333d", "url_regions": [], "region": {"ids": ["227"], "id": "230"}, "action": "browse"}),
        },
    ]);
}

#[test]
fn element_knockouts() {
    for config in [ko(), ko_split()] {
        run_cases(vec![
            Case {
                name: "knockout removes matching value",
                src: json!({"property": {"bedroom_count": ["--1", "2", "3"]}}),
                dest: json!({"property": {"bedroom_count": ["1", "2", "3"]}}),
                config: config.clone(),
                want: json!({"property": {"bedroom_count": ["2", "3"]}}),
            },
            Case {
                name: "knockout without match",
                src: json!({"property": {"bedroom_count": ["--1", "2", "3"]}}),
                dest: json!({"property": {"bedroom_count": ["3"]}}),
                config: config.clone(),
                want: json!({"property": {"bedroom_count": ["3", "2"]}}),
            },
            Case {
                name: "knockout over disjoint destination",
                src: json!({"property": {"bedroom_count": ["--1", "2", "3"]}}),
                dest: json!({"property": {"bedroom_count": ["4"]}}),
                config: config.clone(),
                want: json!({"property": {"bedroom_count": ["4", "2", "3"]}}),
            },
            Case {
                name: "knockout removes prefixed destination element",
                src: json!({"property": {"bedroom_count": ["--1", "2", "3"]}}),
                dest: json!({"property": {"bedroom_count": ["--1", "4"]}}),
                config: config.clone(),
                want: json!({"property": {"bedroom_count": ["4", "2", "3"]}}),
            },
        ]);
    }

    run_cases(vec![Case {
        name: "several knockouts",
        src: json!({"amenity": {"id": ["--1", "--2", "3", "4"]}}),
        dest: json!({"amenity": {"id": ["1", "2"]}}),
        config: ko(),
        want: json!({"amenity": {"id": ["3", "4"]}}),
    }]);
}

#[test]
fn whole_value_knockouts() {
    run_cases(vec![
        Case {
            name: "naked string wipes string",
            src: json!({"amenity": "--"}),
            dest: json!({"amenity": "1"}),
            config: ko_split(),
            want: json!({"amenity": ""}),
        },
        Case {
            name: "naked sequence replaces string",
            src: json!({"amenity": ["--"]}),
            dest: json!({"amenity": "1"}),
            config: ko_split(),
            want: json!({"amenity": []}),
        },
        Case {
            name: "naked string wipes sequence",
            src: json!({"amenity": "--"}),
            dest: json!({"amenity": ["1"]}),
            config: ko_split(),
            want: json!({"amenity": ""}),
        },
        Case {
            name: "naked sequence empties sequence",
            src: json!({"amenity": ["--"]}),
            dest: json!({"amenity": ["1"]}),
            config: ko_split(),
            want: json!({"amenity": []}),
        },
        Case {
            name: "naked element then replacement",
            src: json!({"amenity": ["--", "2"]}),
            dest: json!({"amenity": ["1", "3", "7+"]}),
            config: ko_split(),
            want: json!({"amenity": ["2"]}),
        },
        Case {
            name: "naked element then replacement over string",
            src: json!({"amenity": ["--", "2"]}),
            dest: json!({"amenity": "5"}),
            config: ko_split(),
            want: json!({"amenity": ["2"]}),
        },
        Case {
            name: "naked string wipes mapping",
            src: json!({"amenity": "--"}),
            dest: json!({"amenity": {"id": ["1", "2", "3", "4"]}}),
            config: ko_split(),
            want: json!({"amenity": ""}),
        },
        Case {
            name: "naked sequence replaces mapping",
            src: json!({"amenity": ["--"]}),
            dest: json!({"amenity": {"id": ["1", "2", "3", "4"]}}),
            config: ko_split(),
            want: json!({"amenity": []}),
        },
        Case {
            name: "naked string wipes nested sequence and keeps siblings",
            src: json!({"region": {"ids": "--"}}),
            dest: json!({"region": {"ids": ["1", "2", "3", "4"], "id": "11"}}),
            config: ko_split(),
            want: json!({"region": {"ids": "", "id": "11"}}),
        },
        Case {
            name: "naked string wipes whole subtree",
            src: json!({"region": "--"}),
            dest: json!({"region": {"ids": ["1", "2", "3", "4"], "id": "11"}}),
            config: ko_split(),
            want: json!({"region": ""}),
        },
        Case {
            name: "naked sequence keeps sequence shape",
            src: json!({"region": {"ids": ["--"]}}),
            dest: json!({"region": {"ids": ["1", "2", "3", "4"], "id": "11"}}),
            config: ko_split(),
            want: json!({"region": {"ids": [], "id": "11"}}),
        },
        Case {
            name: "naked element between replacements",
            src: json!({"region": {"ids": ["2", "--", "6"]}}),
            dest: json!({"region": {"ids": ["1", "2", "3", "4"], "id": "11"}}),
            config: ko_split(),
            want: json!({"region": {"ids": ["2", "6"], "id": "11"}}),
        },
        Case {
            name: "naked element between new values",
            src: json!({"region": {"ids": ["7", "--", "6"]}}),
            dest: json!({"region": {"ids": ["1", "2", "3", "4"], "id": "11"}}),
            config: ko_split(),
            want: json!({"region": {"ids": ["7", "6"], "id": "11"}}),
        },
    ]);
}

#[test]
fn edges() {
    run_cases(vec![
        Case {
            name: "naked element is data without knockout",
            src: json!({"region": {"ids": ["7", "--", "2", "6,8"]}}),
            dest: json!({"region": {"ids": ["1", "2", "3", "4"], "id": "11"}}),
            config: bang().with_unpack_arrays(","),
            want: json!({"region": {"ids": ["1", "2", "3", "4", "7", "--", "6", "8"], "id": "11"}}),
        },
        Case {
            name: "no split without separator",
            src: json!({"region": {"ids": ["7", "3", "--", "6,8"]}}),
            dest: json!({"region": {"ids": ["1", "2", "3", "4"], "id": "11"}}),
            config: bang(),
            want: json!({"region": {"ids": ["1", "2", "3", "4", "7", "--", "6,8"], "id": "11"}}),
        },
        Case {
            name: "prefixed string wipes matching string",
            src: json!({"amenity": "--1"}),
            dest: json!({"amenity": "1"}),
            config: ko(),
            want: json!({"amenity": ""}),
        },
        Case {
            name: "prefixed string wipes other string",
            src: json!({"amenity": "--1"}),
            dest: json!({"amenity": "2"}),
            config: ko(),
            want: json!({"amenity": ""}),
        },
        Case {
            name: "prefixed sequence over string wipes it",
            src: json!({"amenity": ["--1"]}),
            dest: json!({"amenity": "1"}),
            config: ko(),
            want: json!({"amenity": ""}),
        },
        Case {
            name: "prefixed element empties sequence",
            src: json!({"amenity": ["--1"]}),
            dest: json!({"amenity": ["1"]}),
            config: ko_split(),
            want: json!({"amenity": []}),
        },
        Case {
            name: "prefixed string into blank mapping",
            src: json!({"amenity": "--1"}),
            dest: json!({}),
            config: ko_split(),
            want: json!({"amenity": ""}),
        },
        Case {
            name: "prefixed string over sequence",
            src: json!({"amenity": "--1"}),
            dest: json!({"amenity": ["1"]}),
            config: ko_split(),
            want: json!({"amenity": ""}),
        },
        Case {
            name: "packed value untouched without separator",
            src: json!({"amenity": {"id": ["26,27"]}}),
            dest: json!({}),
            config: ko(),
            want: json!({"amenity": {"id": ["26,27"]}}),
        },
        Case {
            name: "packed knockouts suppressed in new keys",
            src: json!({"amenity": {"id": ["--26,--27,28"]}}),
            dest: json!({}),
            config: ko_split(),
            want: json!({"amenity": {"id": ["28"]}}),
        },
        Case {
            name: "naked sequence empties ids",
            src: json!({"region": {"ids": ["--"]}, "query_uuid": "zzz"}),
            dest: json!({"region": {"ids": ["227", "2", "3", "3"]}, "query_uuid": "zzz"}),
            config: ko_split(),
            want: json!({"region": {"ids": []}, "query_uuid": "zzz"}),
        },
        Case {
            name: "naked sequence empties ids and keeps siblings",
            src: json!({"region": {"ids": ["--"], "id": "5"}, "query_uuid": "zzz"}),
            dest: json!({"region": {"muni_city_id": "2244", "ids": ["227", "2", "3", "3"], "id": "3"}, "query_uuid": "zzz"}),
            config: ko_split(),
            want: json!({"region": {"muni_city_id": "2244", "ids": [], "id": "5"}, "query_uuid": "zzz"}),
        },
        Case {
            name: "naked element keeps replacement",
            src: json!({"region": {"ids": ["--", "227"], "id": "5"}, "query_uuid": "zzz"}),
            dest: json!({"region": {"muni_city_id": "2244", "ids": ["227", "2", "3", "3"], "id": "3"}, "query_uuid": "zzz"}),
            config: ko_split(),
            want: json!({"region": {"muni_city_id": "2244", "ids": ["227"], "id": "5"}, "query_uuid": "zzz"}),
        },
        Case {
            name: "several whole-value knockouts",
            src: json!({"region": {"muni_city_id": "--", "ids": "--", "id": "5"}, "query_uuid": "zzz"}),
            dest: json!({"region": {"muni_city_id": "2244", "ids": ["227", "2", "3", "3"], "id": "3"}, "query_uuid": "zzz"}),
            config: ko_split(),
            want: json!({"region": {"muni_city_id": "", "ids": "", "id": "5"}, "query_uuid": "zzz"}),
        },
        Case {
            name: "whole-value and naked element knockouts",
            src: json!({"region": {"muni_city_id": "--", "ids": ["--", "227"], "id": "5"}, "query_uuid": "zzz"}),
            dest: json!({"region": {"muni_city_id": "2244", "ids": ["227", "2", "3", "3"], "id": "3"}, "query_uuid": "zzz"}),
            config: ko_split(),
            want: json!({"region": {"muni_city_id": "", "ids": ["227"], "id": "5"}, "query_uuid": "zzz"}),
        },
        Case {
            name: "knockout over already empty value",
            src: json!({"region": {"muni_city_id": "--", "id": ""}}),
            dest: json!({"region": {"muni_city_id": "", "id": ""}}),
            config: ko_split(),
            want: json!({"region": {"muni_city_id": "", "id": ""}}),
        },
        Case {
            name: "sequence of mappings is unioned",
            src: json!({"item": [{"1": "3"}, {"2": "4"}]}),
            dest: json!({"item": [{"3": "5"}]}),
            config: ko().enable_debug(),
            want: json!({"item": [{"3": "5"}, {"1": "3"}, {"2": "4"}]}),
        },
        Case {
            name: "sequence of mappings merged by position",
            src: json!({"item": [{"1": "3"}, {"2": "4"}]}),
            dest: json!({"item": [{"3": "5"}]}),
            config: ko().with_merge_hash_arrays(true),
            want: json!({"item": [{"3": "5", "1": "3"}, {"2": "4"}]}),
        },
    ]);
}

#[test]
fn remerge_of_packed_value_is_stable() {
    let config = ko_split();
    let params = || Tree::from(json!({"amenity": {"id": ["26,27"]}}));

    let first = merge_with_config(params(), Tree::empty_mapping(), &config).unwrap();
    assert_eq!(first, Tree::from(json!({"amenity": {"id": ["26", "27"]}})));

    let second = merge_with_config(params(), first.clone(), &config).unwrap();
    assert_eq!(second, first);
}

#[test]
fn keep_duplicates_on_insert_and_merge() {
    run_cases(vec![Case {
        name: "duplicates appended",
        src: json!({"a": ["x", "x"], "b": ["y"]}),
        dest: json!({"b": ["y"]}),
        config: bang().with_keep_array_duplicates(true),
        want: json!({"a": ["x", "x"], "b": ["y", "y"]}),
    }]);
}
