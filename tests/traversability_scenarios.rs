//! End-to-end traversability scenarios against an in-memory model

use std::cell::{Cell, RefCell};

use glam::DVec3;
use mep_traversability::core::config::{CheckConfig, IntersectionSettings, UnitSettings};
use mep_traversability::core::types::{Category, ContextKind, ElementId};
use mep_traversability::core::units::LengthUnit;
use mep_traversability::correction::{
    CollisionCorrector, CorrectionScene, GeometricScene, MovableElement, OffsetVector,
    ProbeOutcome, StaticAnchor,
};
use mep_traversability::geometry::{Aabb, BoxKernel};
use mep_traversability::host::{JournalTransactions, Messenger};
use mep_traversability::model::{CurveGeometry, Document, DocumentContext, Element};
use mep_traversability::traversability::{
    ElementFilter, SolidIntersectionTester, TraversabilityService, VerdictStatus,
};

/// Messenger that remembers every notification
#[derive(Default)]
struct RecordingMessenger {
    messages: RefCell<Vec<String>>,
}

impl Messenger for RecordingMessenger {
    fn show_failure(&self, title: &str, message: &str) {
        self.messages.borrow_mut().push(format!("{}: {}", title, message));
    }
}

fn mm_config() -> CheckConfig {
    CheckConfig {
        units: UnitSettings {
            display: LengthUnit::Millimeters,
            model: LengthUnit::Millimeters,
        },
        ..CheckConfig::default()
    }
}

/// 2 m duct along +X, 200x200 section, right-hand side is -Y
fn curve(connections: &[u64]) -> Element {
    Element::curve(
        1,
        Category::Duct,
        CurveGeometry {
            start: DVec3::ZERO,
            end: DVec3::new(2000.0, 0.0, 0.0),
            width: 200.0,
            height: 200.0,
        },
    )
    .with_connections(connections.iter().copied())
}

fn branch(id: u64, start: DVec3, end: DVec3) -> Element {
    Element::curve(
        id,
        Category::Duct,
        CurveGeometry {
            start,
            end,
            width: 200.0,
            height: 200.0,
        },
    )
}

fn wall(id: u64, min: [f64; 3], max: [f64; 3]) -> Element {
    Element::boxed(
        id,
        Category::Wall,
        vec![Aabb::new(DVec3::from(min), DVec3::from(max))],
    )
}

fn air_handler() -> Element {
    Element::boxed(
        9,
        Category::Equipment,
        vec![Aabb::new(
            DVec3::new(-300.0, -150.0, -150.0),
            DVec3::new(0.0, 150.0, 150.0),
        )],
    )
}

fn context(elements: Vec<Element>) -> DocumentContext {
    let active = Document::from_elements("Project", elements).unwrap();
    DocumentContext::new(active, vec![]).unwrap()
}

/// Curve + one movable continuation + a static air handler at the start
fn connected_run(obstacle: Element) -> DocumentContext {
    context(vec![
        curve(&[2, 9]),
        branch(2, DVec3::new(2000.0, 0.0, 0.0), DVec3::new(3000.0, 0.0, 0.0)),
        air_handler(),
        obstacle,
    ])
}

#[test]
fn scenario_a_no_nearby_walls_passes_without_search() {
    let ctx = context(vec![
        curve(&[]),
        wall(5, [0.0, 3000.0, -1000.0], [2000.0, 3200.0, 1000.0]),
    ]);
    let config = mm_config();
    let transactions = JournalTransactions::new();
    let messenger = RecordingMessenger::default();
    let service =
        TraversabilityService::builder(ContextKind::Ar, &ctx, &BoxKernel, &config, &transactions)
            .messenger(&messenger)
            .build()
            .unwrap();

    let verdict = service.check(&ctx.curve(ElementId(1)).unwrap()).unwrap();

    assert_eq!(verdict.status, VerdictStatus::Passed);
    assert!(verdict.collisions.is_empty());
    assert!(verdict.search.is_none());
    assert!(messenger.messages.borrow().is_empty());
    assert!(transactions.committed().is_empty());
}

#[test]
fn scenario_b_first_probe_clears_wall_overlap() {
    // Wall only on the +Y side, overlapping the duct by 50 mm
    let ctx = connected_run(wall(5, [900.0, 50.0, -1000.0], [1100.0, 1000.0, 1000.0]));
    let config = mm_config();
    let transactions = JournalTransactions::new();
    let messenger = RecordingMessenger::default();
    let service =
        TraversabilityService::builder(ContextKind::Ar, &ctx, &BoxKernel, &config, &transactions)
            .messenger(&messenger)
            .build()
            .unwrap();
    let curve = ctx.curve(ElementId(1)).unwrap();

    assert!(service.initiate(&curve));

    let verdict = service.check(&curve).unwrap();
    assert_eq!(verdict.collisions.len(), 1);
    assert_eq!(verdict.collisions[0].candidate.id, ElementId(5));
    assert_eq!(verdict.collisions[0].overlap.depth, 50.0);

    let report = verdict.search.as_ref().unwrap();
    assert_eq!(report.probes_evaluated(), 1);
    assert_eq!(report.probes[0].direction, OffsetVector::RIGHT);
    match &verdict.status {
        VerdictStatus::Corrected {
            displacement,
            moved,
        } => {
            assert!((*displacement - DVec3::new(0.0, -100.0, 0.0)).length() < 1e-9);
            assert_eq!(moved, &vec![ElementId(1), ElementId(2)]);
        }
        other => panic!("Expected correction, got {:?}", other),
    }
    assert!(messenger.messages.borrow().is_empty());
}

#[test]
fn scenario_b_commits_move_through_transaction() {
    let mut ctx = connected_run(wall(5, [900.0, 50.0, -1000.0], [1100.0, 1000.0, 1000.0]));
    let config = mm_config();
    let transactions = JournalTransactions::new();
    {
        let service = TraversabilityService::builder(
            ContextKind::Ar,
            &ctx,
            &BoxKernel,
            &config,
            &transactions,
        )
        .build()
        .unwrap();
        service.check(&ctx.curve(ElementId(1)).unwrap()).unwrap();
    }

    assert_eq!(transactions.committed().len(), 2);
    transactions.apply_to(&mut ctx).unwrap();

    let moved = ctx.curve(ElementId(1)).unwrap();
    assert!((moved.geometry.start - DVec3::new(0.0, -100.0, 0.0)).length() < 1e-9);
}

#[test]
fn scenario_c_no_probe_clears_overlap() {
    // Wall fully crossing the run: every displacement still hits it
    let ctx = connected_run(wall(5, [900.0, -1000.0, -1000.0], [1100.0, 1000.0, 1000.0]));
    let config = mm_config();
    let transactions = JournalTransactions::new();
    let messenger = RecordingMessenger::default();
    let service =
        TraversabilityService::builder(ContextKind::Ar, &ctx, &BoxKernel, &config, &transactions)
            .messenger(&messenger)
            .build()
            .unwrap();

    let verdict = service.check(&ctx.curve(ElementId(1)).unwrap()).unwrap();

    assert_eq!(verdict.status, VerdictStatus::Blocked);
    assert!(!verdict.is_passed());
    let report = verdict.search.as_ref().unwrap();
    assert_eq!(report.probes_evaluated(), 4);
    assert!(!report.is_corrected());
    assert!(report
        .probes
        .iter()
        .all(|p| matches!(p.outcome, ProbeOutcome::Unavailable { collisions: 1 })));
    assert_eq!(report.start_collisions_count, Some(1));
    assert_eq!(messenger.messages.borrow().len(), 1);
    assert!(messenger.messages.borrow()[0].contains("#5"));
    assert!(transactions.committed().is_empty());
}

/// Delegating scene counting anchor computations
struct CountingScene<'s, S: CorrectionScene> {
    inner: &'s S,
    anchor_calls: Cell<usize>,
}

impl<S: CorrectionScene> CorrectionScene for CountingScene<'_, S> {
    fn movable_element(&self, offset: DVec3) -> MovableElement {
        self.inner.movable_element(offset)
    }

    fn static_center_points(&self, movable: &MovableElement) -> Vec<StaticAnchor> {
        self.anchor_calls.set(self.anchor_calls.get() + 1);
        self.inner.static_center_points(movable)
    }

    fn is_position_available(&self, movable: &MovableElement, anchors: &[StaticAnchor]) -> bool {
        self.inner.is_position_available(movable, anchors)
    }
}

#[test]
fn scenario_d_two_movable_neighbors_rejected_every_probe() {
    let ctx = context(vec![
        curve(&[2, 3]),
        branch(2, DVec3::new(2000.0, 0.0, 0.0), DVec3::new(3000.0, 0.0, 0.0)),
        branch(3, DVec3::ZERO, DVec3::new(-1000.0, 0.0, 0.0)),
        wall(5, [900.0, 50.0, -1000.0], [1100.0, 1000.0, 1000.0]),
    ]);
    let config = mm_config();
    let curve = ctx.curve(ElementId(1)).unwrap();
    let filter = ElementFilter::for_context(&ctx, &config.ar).unwrap();
    let tester = SolidIntersectionTester::new(
        &BoxKernel,
        &config.ar.wall_intersection,
        &config.units,
        config.search_margin_model(),
    );
    let scene = GeometricScene::new(&curve, ctx.active(), &filter, &tester, 500.0);
    let counting = CountingScene {
        inner: &scene,
        anchor_calls: Cell::new(0),
    };

    let report = CollisionCorrector::new(&counting, curve.frame(), 100.0).run();

    assert!(!report.is_corrected());
    assert_eq!(report.probes_evaluated(), 4);
    assert!(report
        .probes
        .iter()
        .all(|p| p.outcome == ProbeOutcome::RejectedTopology { movable_count: 2 }));
    assert_eq!(counting.anchor_calls.get(), 0);
    assert_eq!(report.start_collisions_count, None);
}

#[test]
fn isolated_curve_cannot_be_corrected() {
    let ctx = context(vec![
        curve(&[]),
        wall(5, [900.0, 50.0, -1000.0], [1100.0, 1000.0, 1000.0]),
    ]);
    let config = mm_config();
    let transactions = JournalTransactions::new();
    let messenger = RecordingMessenger::default();
    let service =
        TraversabilityService::builder(ContextKind::Ar, &ctx, &BoxKernel, &config, &transactions)
            .messenger(&messenger)
            .build()
            .unwrap();

    assert!(!service.initiate(&ctx.curve(ElementId(1)).unwrap()));
    assert_eq!(messenger.messages.borrow().len(), 1);
}

#[test]
fn probe_into_movable_service_is_rejected_and_search_continues() {
    // A pipe right of the run makes probe 1 implicate a second movable element
    let pipe = Element::curve(
        6,
        Category::Pipe,
        CurveGeometry {
            start: DVec3::new(0.0, -250.0, 0.0),
            end: DVec3::new(2000.0, -250.0, 0.0),
            width: 110.0,
            height: 110.0,
        },
    );
    let mut elements = vec![
        curve(&[2, 9]),
        branch(2, DVec3::new(2000.0, 0.0, 0.0), DVec3::new(3000.0, 0.0, 0.0)),
        air_handler(),
        wall(5, [900.0, -1000.0, 50.0], [1100.0, 1000.0, 1000.0]),
    ];
    elements.push(pipe);
    let ctx = context(elements);
    let config = mm_config();
    let transactions = JournalTransactions::new();
    let service =
        TraversabilityService::builder(ContextKind::Ar, &ctx, &BoxKernel, &config, &transactions)
            .build()
            .unwrap();

    let verdict = service.check(&ctx.curve(ElementId(1)).unwrap()).unwrap();
    let report = verdict.search.as_ref().unwrap();

    assert_eq!(
        report.probes[0].outcome,
        ProbeOutcome::RejectedTopology { movable_count: 2 }
    );
    assert_eq!(report.accepted().unwrap().direction, OffsetVector::DOWN);
    assert!(verdict.is_passed());
}

#[test]
fn repeated_checks_yield_same_verdict() {
    let ctx = connected_run(wall(5, [900.0, -1000.0, -1000.0], [1100.0, 1000.0, 1000.0]));
    let config = mm_config();
    let transactions = JournalTransactions::new();
    let service =
        TraversabilityService::builder(ContextKind::Kr, &ctx, &BoxKernel, &config, &transactions)
            .build()
            .unwrap();
    let curve = ctx.curve(ElementId(1)).unwrap();

    let first = service.check(&curve).unwrap();
    let second = service.check(&curve).unwrap();
    assert_eq!(first, second);
}

#[test]
fn builder_overrides_replace_context_settings() {
    // 50 mm of wall overlap stays under a 60 mm tolerance
    let ctx = connected_run(wall(5, [900.0, 50.0, -1000.0], [1100.0, 1000.0, 1000.0]));
    let config = mm_config();
    let transactions = JournalTransactions::new();
    let lenient = IntersectionSettings {
        min_overlap: 60.0,
        ..IntersectionSettings::architectural()
    };
    let service =
        TraversabilityService::builder(ContextKind::Ar, &ctx, &BoxKernel, &config, &transactions)
            .filter(ElementFilter::ActiveOnly(ctx.active()))
            .settings(&lenient)
            .build()
            .unwrap();

    assert!(matches!(service.filter(), ElementFilter::ActiveOnly(_)));
    let verdict = service.check(&ctx.curve(ElementId(1)).unwrap()).unwrap();
    assert_eq!(verdict.status, VerdictStatus::Passed);
}
