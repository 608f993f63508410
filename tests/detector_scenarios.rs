//! End-to-end pipeline scenarios over pre-decoded class declarations.

use pretty_assertions::assert_eq;
use singlemap::analysis::Detector;
use singlemap::classfile::{access, ClassDecl, MemberDecl, UsageEvent};
use singlemap::config::DetectorConfig;
use singlemap::core::Visibility;

fn field(name: &str, descriptor: &str, access: u16) -> MemberDecl {
    MemberDecl {
        name: name.to_string(),
        descriptor: descriptor.to_string(),
        access,
    }
}

fn static_method(name: &str, descriptor: &str) -> MemberDecl {
    MemberDecl {
        name: name.to_string(),
        descriptor: descriptor.to_string(),
        access: access::STATIC | access::PUBLIC,
    }
}

fn singleton_decl(name: &str) -> ClassDecl {
    ClassDecl {
        name: name.to_string(),
        super_name: "java/lang/Object".to_string(),
        fields: vec![field(
            "instance",
            &format!("L{name};"),
            access::PRIVATE | access::STATIC,
        )],
        methods: vec![static_method("getInstance", &format!("()L{name};"))],
        events: Vec::new(),
    }
}

fn caller_decl(name: &str, target: &str) -> ClassDecl {
    ClassDecl {
        name: name.to_string(),
        super_name: "java/lang/Object".to_string(),
        events: vec![UsageEvent::StaticCall {
            owner: target.to_string(),
            name: "getInstance".to_string(),
            descriptor: format!("()L{target};"),
        }],
        ..ClassDecl::default()
    }
}

fn plain_decl(name: &str) -> ClassDecl {
    ClassDecl {
        name: name.to_string(),
        super_name: "java/lang/Object".to_string(),
        ..ClassDecl::default()
    }
}

fn visibility(detector: &Detector, name: &str) -> Visibility {
    detector.registry().get(name).unwrap().visibility
}

#[test]
fn zero_threshold_draws_the_singleton_and_its_user() {
    let decls = vec![
        singleton_decl("app/Config"),
        caller_decl("app/User", "app/Config"),
        plain_decl("app/Bystander"),
    ];
    let detector = Detector::from_decls(&decls, "", DetectorConfig::default());

    assert_eq!(visibility(&detector, "app/Config"), Visibility::DrawnDirect);
    assert_eq!(visibility(&detector, "app/User"), Visibility::DrawnDirect);
    assert_eq!(visibility(&detector, "app/Bystander"), Visibility::Undrawn);

    let doc = detector.graphml();
    assert!(doc.contains("<node id=\"app/Config\">"));
    assert!(doc.contains("<y:Fill color = \"#FF0000\"/>"));
    assert!(doc.contains("<y:Shape type=\"rectangle\"/>"));
    assert!(doc.contains("<node id=\"app/User\">"));
    assert!(doc.contains("<y:Fill color = \"#CCFFFF\"/>"));
    assert!(doc.contains("<y:Shape type=\"ellipse\"/>"));
    assert!(doc.contains("<edge source=\"app/User\" target=\"app/Config\">"));
    assert!(!doc.contains("app/Bystander"));
}

#[test]
fn threshold_keeps_popular_nodes_and_pulls_in_their_users() {
    let decls = vec![
        singleton_decl("app/Config"),
        caller_decl("app/U1", "app/Config"),
        caller_decl("app/U2", "app/Config"),
        plain_decl("app/Bystander"),
    ];
    let config = DetectorConfig {
        threshold: 2,
        ..DetectorConfig::default()
    };
    let detector = Detector::from_decls(&decls, "", config);

    assert_eq!(visibility(&detector, "app/Config"), Visibility::DrawnDirect);
    // Users below the threshold on their own still get drawn through the
    // single propagation hop from a drawn target.
    assert_eq!(visibility(&detector, "app/U1"), Visibility::DrawnPropagated);
    assert_eq!(visibility(&detector, "app/U2"), Visibility::DrawnPropagated);
    assert_eq!(visibility(&detector, "app/Bystander"), Visibility::Undrawn);
}

#[test]
fn nothing_is_drawn_below_the_threshold() {
    let decls = vec![
        singleton_decl("app/Config"),
        caller_decl("app/User", "app/Config"),
    ];
    let config = DetectorConfig {
        threshold: 2,
        ..DetectorConfig::default()
    };
    let detector = Detector::from_decls(&decls, "", config);

    assert_eq!(visibility(&detector, "app/Config"), Visibility::Undrawn);
    assert_eq!(visibility(&detector, "app/User"), Visibility::Undrawn);
    let doc = detector.graphml();
    assert!(!doc.contains("<node"));
    assert!(!doc.contains("<edge"));
}

#[test]
fn disabling_singletons_removes_their_nodes_and_edges() {
    let decls = vec![
        singleton_decl("app/Config"),
        caller_decl("app/User", "app/Config"),
    ];
    let config = DetectorConfig {
        detect_singletons: false,
        ..DetectorConfig::default()
    };
    let detector = Detector::from_decls(&decls, "", config);

    // The would-be singleton stays unclassified rather than degrading to a
    // weaker category, so the accessor call matches nothing.
    assert!(detector.registry().get("app/User").unwrap().uses.is_empty());
    assert_eq!(visibility(&detector, "app/Config"), Visibility::Undrawn);
    assert_eq!(visibility(&detector, "app/User"), Visibility::Undrawn);
}

#[test]
fn hingleton_nodes_carry_the_parenthesized_target_label() {
    let holder = ClassDecl {
        name: "app/ConfigHolder".to_string(),
        super_name: "java/lang/Object".to_string(),
        fields: vec![field(
            "config",
            "Lapp/Config;",
            access::PRIVATE | access::STATIC,
        )],
        methods: vec![static_method("getConfig", "()Lapp/Config;")],
        events: Vec::new(),
    };
    let user = ClassDecl {
        name: "app/User".to_string(),
        super_name: "java/lang/Object".to_string(),
        events: vec![UsageEvent::StaticCall {
            owner: "app/ConfigHolder".to_string(),
            name: "getConfig".to_string(),
            descriptor: "()Lapp/Config;".to_string(),
        }],
        ..ClassDecl::default()
    };
    let detector = Detector::from_decls(&[holder, user], "", DetectorConfig::default());

    let doc = detector.graphml();
    assert!(doc.contains("<y:Fill color = \"#FF9900\"/>"));
    assert!(doc.contains("ConfigHolder&#xA;app&#xA;(Config)&#xA;(app)"));
    assert!(doc.contains("<edge source=\"app/User\" target=\"app/ConfigHolder\">"));
}

#[test]
fn fingleton_field_reads_become_edges() {
    let globals = ClassDecl {
        name: "app/Globals".to_string(),
        super_name: "java/lang/Object".to_string(),
        fields: vec![field(
            "REGISTRY",
            "Lapp/Registry;",
            access::PUBLIC | access::STATIC,
        )],
        ..ClassDecl::default()
    };
    let user = ClassDecl {
        name: "app/User".to_string(),
        super_name: "java/lang/Object".to_string(),
        events: vec![UsageEvent::FieldAccess {
            owner: "app/Globals".to_string(),
            name: "REGISTRY".to_string(),
            descriptor: "Lapp/Registry;".to_string(),
            write: false,
        }],
        ..ClassDecl::default()
    };
    let detector = Detector::from_decls(&[globals, user], "", DetectorConfig::default());

    assert!(detector
        .registry()
        .get("app/User")
        .unwrap()
        .uses
        .contains("app/Globals"));
    let doc = detector.graphml();
    assert!(doc.contains("<y:Fill color = \"#00FF00\"/>"));
}

#[test]
fn identical_inputs_produce_identical_documents() {
    let decls = vec![
        singleton_decl("app/Config"),
        caller_decl("app/U1", "app/Config"),
        caller_decl("app/U2", "app/Config"),
        singleton_decl("app/Cache"),
        caller_decl("app/U3", "app/Cache"),
    ];
    let first = Detector::from_decls(&decls, "", DetectorConfig::default()).graphml();
    let second = Detector::from_decls(&decls, "", DetectorConfig::default()).graphml();
    assert_eq!(first, second);
}

#[test]
fn stats_summarize_the_drawn_subgraph() {
    let decls = vec![
        singleton_decl("app/Config"),
        caller_decl("app/U1", "app/Config"),
        caller_decl("app/U2", "app/Config"),
        plain_decl("app/Bystander"),
    ];
    let config = DetectorConfig {
        show_stats: true,
        detect_hingletons: false,
        detect_mingletons: false,
        detect_fingletons: false,
        ..DetectorConfig::default()
    };
    let detector = Detector::from_decls(&decls, "", config);

    assert_eq!(detector.stats().classes_read, 4);
    assert_eq!(detector.stats().classes_drawn, 3);
    assert_eq!(
        detector.stats_text(true),
        "Classes drawn: 3 of 4\nSingletons:    1     Singleton users:    2"
    );
}

#[test]
fn banner_node_precedes_class_nodes() {
    let decls = vec![
        singleton_decl("app/Config"),
        caller_decl("app/User", "app/Config"),
    ];
    let config = DetectorConfig {
        show_banner: true,
        ..DetectorConfig::default()
    };
    let doc = Detector::from_decls(&decls, "", config).graphml();

    let banner = doc.find("<node id=\"banner\">").unwrap();
    let first_class = doc.find("<node id=\"app/Config\">").unwrap();
    assert!(banner < first_class);
    assert!(doc.contains("Classes drawn: 2 of 2&#xA;"));
}

#[test]
fn package_prefix_is_stripped_from_the_whole_graph() {
    let decls = vec![
        singleton_decl("com/example/app/Config"),
        caller_decl("com/example/app/User", "com/example/app/Config"),
    ];
    let detector = Detector::from_decls(&decls, "com/example/", DetectorConfig::default());

    assert!(detector.registry().contains("app/Config"));
    assert!(!detector.registry().contains("com/example/app/Config"));
    let doc = detector.graphml();
    assert!(doc.contains("<node id=\"app/Config\">"));
    assert!(doc.contains(">Config&#xA;app</y:NodeLabel>"));
}
