// tests/rewriting.rs
use lsystem_flora::{Grammar, RewriteEngine, presets};

fn engine(axiom: &str, rules: &[(char, &str)]) -> RewriteEngine {
    let mut engine = RewriteEngine::new();
    engine.set_axiom(axiom);
    for (symbol, replacement) in rules {
        engine.add_rule(*symbol, *replacement);
    }
    engine
}

#[test]
fn test_generation_zero_is_axiom() {
    let mut engine = engine("F[+X]", &[('F', "FF"), ('X', "F-X")]);
    assert_eq!(engine.current(), "F[+X]");
    assert_eq!(engine.generate(0), "F[+X]");
    assert_eq!(engine.generation(), 0);

    engine.generate(3);
    assert_eq!(engine.generation(), 3);
    engine.reset();
    assert_eq!(engine.current(), "F[+X]");
    assert_eq!(engine.generation(), 0);
    // Reset keeps rules
    assert_eq!(engine.rule('F'), Some("FF"));
}

#[test]
fn test_rewriting_is_parallel() {
    let mut engine = engine("F", &[('F', "FF")]);
    assert_eq!(engine.generate(1), "FF");
    assert_eq!(engine.generate(2), "FFFF");
    assert_eq!(engine.generate(3).len(), 8);
}

#[test]
fn test_generate_restarts_from_axiom() {
    let mut engine = engine("A", &[('A', "AB"), ('B', "A")]);
    assert_eq!(engine.generate(3), "ABAAB");
    // Not applied on top of the previous result
    assert_eq!(engine.generate(1), "AB");
}

#[test]
fn test_constants_pass_through() {
    let mut engine = engine("F+F", &[('F', "FF")]);
    assert_eq!(engine.generate(1), "FF+FF");
}

#[test]
fn test_koch_single_rewrite() {
    let mut engine = engine("F++F++F", &[('F', "F-F++F-F")]);
    engine.set_angle(60.0);
    let result = engine.generate(1);
    assert_eq!(result, "F-F++F-F++F-F++F-F++F-F++F-F");
    assert_eq!(result.chars().count(), 28);
    assert_eq!(engine.angle(), 60.0);
}

#[test]
fn test_length_is_monotonic_without_erasure() {
    let mut engine = presets::default_preset().engine();
    let mut previous = 0;
    for n in 0..6 {
        let len = engine.generate(n).len();
        assert!(len >= previous, "generation {n} shrank: {len} < {previous}");
        previous = len;
    }
}

#[test]
fn test_erasure_and_self_reference() {
    let mut engine = engine("AB", &[('A', ""), ('B', "BB")]);
    assert_eq!(engine.generate(1), "BB");
    assert_eq!(engine.generate(2), "BBBB");
}

#[test]
fn test_last_rule_wins_and_clear() {
    let mut engine = engine("F", &[('F', "FF")]);
    engine.add_rule('F', "F+F");
    assert_eq!(engine.generate(1), "F+F");
    assert_eq!(engine.rules().len(), 1);

    engine.clear_rules();
    assert!(engine.rules().is_empty());
    assert_eq!(engine.generate(4), "F");
}

#[test]
fn test_set_axiom_rewinds() {
    let mut engine = engine("F", &[('F', "FF")]);
    engine.generate(2);
    engine.set_axiom("G");
    assert_eq!(engine.generation(), 0);
    assert_eq!(engine.current(), "G");
    assert_eq!(engine.rule('F'), Some("FF"));
}

#[test]
fn test_estimate_matches_generation() {
    for preset in lsystem_flora::PRESETS {
        let mut engine = preset.engine();
        for n in 0..4 {
            let expected = engine.generate(n).chars().count() as u64;
            assert_eq!(
                engine.estimate_length(n),
                expected,
                "{} at generation {n}",
                preset.name
            );
        }
    }
}

#[test]
fn test_estimate_saturates() {
    let engine = engine("F", &[('F', "FFFFFFFFFF")]);
    assert_eq!(engine.estimate_length(200), u64::MAX);
}

#[test]
fn test_rules_from_list() {
    let mut engine = engine("X", &[('Q', "QQ")]);
    let installed = engine.set_rules_from_list("F->FF, X->F[+X]-X\n  Y->  \n->Z, garbage,");
    assert_eq!(installed, 3);
    assert_eq!(engine.rule('F'), Some("FF"));
    assert_eq!(engine.rule('X'), Some("F[+X]-X"));
    assert_eq!(engine.rule('Y'), Some(""));
    assert_eq!(engine.rule('Q'), None);
}

#[test]
fn test_grammar_rewrite_pass() {
    let grammar = Grammar::new("F")
        .with_rule('F', "F[+F]")
        .with_angle(30.0);
    assert_eq!(grammar.rewrite("F-F"), "F[+F]-F[+F]");

    let engine = RewriteEngine::from_grammar(grammar.clone());
    assert_eq!(engine.current(), "F");
    assert_eq!(engine.grammar(), &grammar);
}
