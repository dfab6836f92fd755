//! Runtime class declarations the synthesized probes reference.
//!
//! Program documents only declare application classes, so everything the
//! probes call or read is seeded into a fresh [`AnalysisContext`] up front.

use jweave_ir::{PrimKind, Type};

use crate::class::{ClassModel, FieldModel, MethodModel};
use crate::context::AnalysisContext;
use crate::modifiers::Modifiers;

fn method(name: &str, params: &[Type], ret: Type, modifiers: Modifiers) -> MethodModel {
    MethodModel {
        name: name.to_string(),
        params: params.to_vec(),
        ret,
        modifiers,
        body: None,
    }
}

fn class(
    name: &str,
    superclass: Option<&str>,
    modifiers: Modifiers,
    fields: Vec<FieldModel>,
    methods: Vec<MethodModel>,
) -> ClassModel {
    ClassModel {
        name: name.to_string(),
        superclass: superclass.map(str::to_string),
        modifiers,
        fields,
        methods,
    }
}

/// Install the runtime declarations into `ctx`.
pub fn install(ctx: &mut AnalysisContext) {
    let public = Modifiers::PUBLIC;

    ctx.declare(class(
        "java.lang.Object",
        None,
        public,
        vec![],
        vec![
            method("getClass", &[], Type::parse("java.lang.Class"), public),
            method("toString", &[], Type::String, public),
        ],
    ));

    // One valueOf overload per primitive kind.
    let value_of = PrimKind::ALL
        .iter()
        .map(|&kind| {
            method(
                "valueOf",
                &[Type::Prim(kind)],
                Type::String,
                public | Modifiers::STATIC,
            )
        })
        .collect();
    ctx.declare(class(
        "java.lang.String",
        Some("java.lang.Object"),
        public | Modifiers::FINAL,
        vec![],
        value_of,
    ));

    ctx.declare(class(
        "java.lang.StringBuilder",
        Some("java.lang.Object"),
        public | Modifiers::FINAL,
        vec![],
        vec![
            method("<init>", &[Type::String], Type::Void, public),
            method(
                "append",
                &[Type::String],
                Type::parse("java.lang.StringBuilder"),
                public,
            ),
            method("toString", &[], Type::String, public),
        ],
    ));

    ctx.declare(class(
        "java.lang.Class",
        Some("java.lang.Object"),
        public | Modifiers::FINAL,
        vec![],
        vec![method("getName", &[], Type::String, public)],
    ));

    ctx.declare(class(
        "java.lang.System",
        Some("java.lang.Object"),
        public | Modifiers::FINAL,
        vec![FieldModel {
            name: "out".to_string(),
            ty: Type::parse("java.io.PrintStream"),
            modifiers: public | Modifiers::STATIC | Modifiers::FINAL,
        }],
        vec![],
    ));

    ctx.declare(class(
        "java.io.PrintStream",
        Some("java.lang.Object"),
        public,
        vec![],
        vec![method("println", &[Type::String], Type::Void, public)],
    ));

    ctx.declare(class(
        "android.view.View",
        Some("java.lang.Object"),
        public,
        vec![],
        vec![method("getId", &[], Type::parse("int"), public)],
    ));

    ctx.declare(class(
        "android.view.MenuItem",
        Some("java.lang.Object"),
        public | Modifiers::INTERFACE,
        vec![],
        vec![method(
            "getItemId",
            &[],
            Type::parse("int"),
            public | Modifiers::ABSTRACT,
        )],
    ));

    ctx.declare(class(
        "android.app.Activity",
        Some("java.lang.Object"),
        public,
        vec![],
        vec![],
    ));

    ctx.declare(class(
        "android.app.Fragment",
        Some("java.lang.Object"),
        public,
        vec![],
        vec![method(
            "getActivity",
            &[],
            Type::parse("android.app.Activity"),
            public,
        )],
    ));

    ctx.declare(class(
        "androidx.fragment.app.Fragment",
        Some("java.lang.Object"),
        public,
        vec![],
        vec![method(
            "getActivity",
            &[],
            Type::parse("androidx.fragment.app.FragmentActivity"),
            public,
        )],
    ));
}
