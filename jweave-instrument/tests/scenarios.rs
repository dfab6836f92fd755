//! End-to-end probe shapes for each method-shape variant.

use jweave_instrument::{
    Blacklist, InstrumentConfig, Instrumenter, ProbeSynthesizer,
};
use jweave_ir::{Instruction, Operand};
use jweave_model::doc::ProgramDoc;
use jweave_model::{AnalysisContext, ClassModel, MethodModel, Unit};

const PROGRAM: &str = r#"
classes:
  - name: com.example.app.MainActivity
    superclass: android.app.Activity
    modifiers: [public]
    methods:
      - name: foo
        modifiers: [public]
        body: ["x = 1", "return"]
      - name: onClick
        params: [android.view.View]
        modifiers: [public]
        body: ["return"]
      - name: onOptionsItemSelected
        params: [android.view.MenuItem]
        returns: boolean
        modifiers: [public]
        body: ["return $z0"]
      - name: onCreate
        params: [android.os.Bundle]
        modifiers: [public]
        body: ["return"]
  - name: com.example.app.DetailFragment
    superclass: android.app.Fragment
    modifiers: [public]
    methods:
      - name: onCreateView
        params: [android.view.LayoutInflater, android.view.ViewGroup, android.os.Bundle]
        returns: android.view.View
        modifiers: [public]
        body: ["return $r4"]
  - name: com.example.app.OrphanFragment
    superclass: com.example.app.PlainBase
    modifiers: [public]
    methods:
      - name: onCreateView
        params: [android.view.LayoutInflater, android.view.ViewGroup, android.os.Bundle]
        returns: android.view.View
        modifiers: [public]
        body: ["return $r4"]
  - name: com.example.app.PlainBase
    superclass: java.lang.Object
    modifiers: [public]
"#;

fn load() -> (AnalysisContext, Vec<ClassModel>) {
    let doc: ProgramDoc = serde_yaml::from_str(PROGRAM).unwrap();
    let classes = doc.build();
    let mut ctx = AnalysisContext::with_runtime();
    ctx.declare_all(&classes);
    (ctx, classes)
}

fn method<'a>(classes: &'a [ClassModel], class: &str, name: &str) -> (&'a ClassModel, &'a MethodModel) {
    let class = classes.iter().find(|c| c.name == class).unwrap();
    (class, class.method_by_name(name).unwrap())
}

fn build(ctx: &AnalysisContext, class: &ClassModel, method: &MethodModel) -> jweave_ir::InstructionBatch {
    let config = InstrumentConfig::default();
    ProbeSynthesizer::new(ctx, &config)
        .build_probe(class, method, method.body.as_ref().unwrap())
        .unwrap()
}

#[test]
fn plain_method_prints_its_signature_literal() {
    let (ctx, classes) = load();
    let (class, foo) = method(&classes, "com.example.app.MainActivity", "foo");
    let batch = build(&ctx, class, foo);

    assert_eq!(batch.len(), 2);
    assert_eq!(
        batch.result,
        Some(Operand::StringLit(
            "<METHOD> Method: <com.example.app.MainActivity: void foo()>".to_string()
        ))
    );
    assert!(batch.instructions[1].to_string().contains("println"));
}

#[test]
fn widget_callback_records_the_view_id() {
    let (ctx, classes) = load();
    let (class, on_click) = method(&classes, "com.example.app.MainActivity", "onClick");
    let batch = build(&ctx, class, on_click);

    // getId + five-instruction concat + two-instruction print.
    assert_eq!(batch.len(), 8);
    let rendered: Vec<String> = batch.iter().map(|i| i.to_string()).collect();
    assert!(rendered[0].contains("virtualinvoke @parameter0.<android.view.View: int getId()>"));
    assert!(rendered[2].contains(
        "<CONTROL> Method: <com.example.app.MainActivity: void onClick(android.view.View)> View: "
    ));
    assert!(rendered[3].contains("valueOf(int)"));
    assert!(rendered[7].contains("println"));
}

#[test]
fn menu_callback_uses_interface_dispatch() {
    let (ctx, classes) = load();
    let (class, selected) = method(
        &classes,
        "com.example.app.MainActivity",
        "onOptionsItemSelected",
    );
    let batch = build(&ctx, class, selected);

    assert_eq!(batch.len(), 8);
    assert!(
        batch.instructions[0]
            .to_string()
            .contains("interfaceinvoke @parameter0.<android.view.MenuItem: int getItemId()>")
    );
}

#[test]
fn lifecycle_hook_gets_an_activity_preface() {
    let (ctx, classes) = load();
    let (class, on_create) = method(&classes, "com.example.app.MainActivity", "onCreate");
    let batch = build(&ctx, class, on_create);

    // Preface: getClass, getName, four-instruction concat, print. Then the
    // generic probe's print.
    assert_eq!(batch.len(), 10);
    let rendered: Vec<String> = batch.iter().map(|i| i.to_string()).collect();
    assert!(rendered[0].contains("getClass"));
    assert!(rendered[3].contains("<ACTIVITY> Activity: "));
    assert!(rendered[7].contains("println"));
    assert!(rendered[9].contains("println"));
    assert!(rendered[9].contains("<METHOD> Method: "));
}

#[test]
fn fragment_with_host_accessor_guards_the_host_segment() {
    let (ctx, classes) = load();
    let (class, on_create_view) = method(&classes, "com.example.app.DetailFragment", "onCreateView");
    let batch = build(&ctx, class, on_create_view);

    // 14-instruction fragment link plus the generic probe's print.
    assert_eq!(batch.len(), 16);
    let guard_at = batch
        .iter()
        .position(|i| matches!(i, Instruction::IfNullJump { .. }))
        .unwrap();
    let target = batch.instructions[guard_at].jump_target().unwrap();
    assert!(batch.instructions[target].to_string().contains("toString"));
}

#[test]
fn fragment_without_accessor_degrades_to_base_message() {
    let (ctx, classes) = load();
    let (class, on_create_view) = method(&classes, "com.example.app.OrphanFragment", "onCreateView");
    let batch = build(&ctx, class, on_create_view);

    // Eight-instruction base fragment probe plus the generic print; no guard.
    assert_eq!(batch.len(), 10);
    assert!(
        !batch
            .iter()
            .any(|i| matches!(i, Instruction::IfNullJump { .. }))
    );
    let rendered: Vec<String> = batch.iter().map(|i| i.to_string()).collect();
    assert!(rendered[1].contains("<FRAGMENT> Fragment: "));
    assert!(rendered[7].contains("println"));
    assert!(rendered[9].contains("println"));
}

#[test]
fn instrumented_fragment_body_validates_with_absolute_guard_target() {
    let (ctx, mut classes) = load();
    let instrumenter = Instrumenter::new(InstrumentConfig::default(), Blacklist::empty());
    let summary = instrumenter.instrument_program(&ctx, &mut classes);
    assert_eq!(summary.failed, 0);

    let fragment = classes
        .iter()
        .find(|c| c.name == "com.example.app.DetailFragment")
        .unwrap();
    let body = fragment.methods[0].body.as_ref().unwrap();
    body.validate().unwrap();

    // Prologue: this + three parameter bindings, then the probe.
    assert_eq!(body.splice_point(), 4);
    let guard_target = body
        .units
        .iter()
        .find_map(|u| match u {
            Unit::Inst(insn) => insn.jump_target(),
            _ => None,
        })
        .unwrap();
    assert!(body.units[guard_target].to_string().contains("toString"));
}

#[test]
fn a_second_pass_splices_a_second_probe() {
    // Documented non-idempotence: instrument once per method per pass.
    let (ctx, mut classes) = load();
    let instrumenter = Instrumenter::new(InstrumentConfig::default(), Blacklist::empty());
    instrumenter.instrument_program(&ctx, &mut classes);
    let after_one = classes[0].methods[0].body.as_ref().unwrap().units.len();
    instrumenter.instrument_program(&ctx, &mut classes);
    let after_two = classes[0].methods[0].body.as_ref().unwrap().units.len();
    assert!(after_two > after_one);
}
