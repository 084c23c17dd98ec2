use plantilla::{value, Engine, Map, Value};

#[test]
fn render_raw() {
    let result = Engine::new()
        .compile("Se rinde el presente informe.")
        .unwrap()
        .render(value! { x: 1 })
        .unwrap();
    assert_eq!(result, "Se rinde el presente informe.");
}

#[test]
fn render_inline_expr_string() {
    let result = Engine::new()
        .compile("Hola {{ nombre }}!")
        .unwrap()
        .render(value! { nombre: "Ana" })
        .unwrap();
    assert_eq!(result, "Hola Ana!");
}

#[test]
fn render_inline_expr_bool() {
    let result = Engine::new()
        .compile("{{ x }}")
        .unwrap()
        .render(value! { x: true })
        .unwrap();
    assert_eq!(result, "true");
}

#[test]
fn render_inline_expr_integer() {
    let result = Engine::new()
        .compile("{{ x }}")
        .unwrap()
        .render(value! { x: 123 })
        .unwrap();
    assert_eq!(result, "123");
}

#[test]
fn render_inline_expr_float() {
    let engine = Engine::new();
    let template = engine.compile("{{ x }}").unwrap();
    assert_eq!(template.render(value! { x: 2.5 }).unwrap(), "2.5");
    assert_eq!(template.render(value! { x: 3.0 }).unwrap(), "3");
}

#[test]
fn render_inline_expr_list() {
    let result = Engine::new()
        .compile("{{ xs }}")
        .unwrap()
        .render(value! { xs: [1, 2, "tres"] })
        .unwrap();
    assert_eq!(result, "1,2,tres");
}

#[test]
fn render_inline_expr_map_is_empty() {
    let result = Engine::new()
        .compile("[{{ m }}]")
        .unwrap()
        .render(value! { m: { a: 1 } })
        .unwrap();
    assert_eq!(result, "[]");
}

#[test]
fn render_inline_expr_missing_is_empty() {
    let result = Engine::new()
        .compile("[{{ nada }}][{{ a.b.c }}][{{ xs.5 }}]")
        .unwrap()
        .render(value! { a: { b: 1 }, xs: [] })
        .unwrap();
    assert_eq!(result, "[][][]");
}

#[test]
fn render_inline_expr_nested_path() {
    let result = Engine::new()
        .compile("{{ a.b.c }}")
        .unwrap()
        .render(value! { a: { b: { c: "profundo" } } })
        .unwrap();
    assert_eq!(result, "profundo");
}

#[test]
fn render_inline_expr_list_index() {
    let result = Engine::new()
        .compile("{{ xs.1 }} {{ xs.[0] }}")
        .unwrap()
        .render(value! { xs: ["a", "b"] })
        .unwrap();
    assert_eq!(result, "b a");
}

#[test]
fn render_inline_expr_segment() {
    let mut inner = Map::new();
    inner.insert("fecha del evento".to_owned(), Value::from("hoy"));
    let mut ctx = Map::new();
    ctx.insert("fecha del evento".to_owned(), Value::from("ayer"));
    ctx.insert("obj".to_owned(), Value::Map(inner));

    let result = Engine::new()
        .render(
            "{{[fecha del evento]}} {{obj.[fecha del evento]}}",
            &Value::Map(ctx),
        )
        .unwrap();
    assert_eq!(result, "ayer hoy");
}

#[test]
fn render_inline_expr_length() {
    let result = Engine::new()
        .compile("{{ xs.length }} {{ s.length }} [{{ n.length }}]")
        .unwrap()
        .render(value! { xs: [1, 2, 3], s: "año", n: 7 })
        .unwrap();
    assert_eq!(result, "3 3 []");
}

#[test]
fn render_unescaped_forms() {
    let result = Engine::new()
        .compile("{{{ t }}} {{& t }} {{ t }}")
        .unwrap()
        .render(value! { t: "<b>&</b>" })
        .unwrap();
    assert_eq!(result, "<b>&</b> <b>&</b> <b>&</b>");
}

#[test]
fn render_comments() {
    let result = Engine::new()
        .compile("a{{! nota }}b{{!-- {{ x }} --}}c")
        .unwrap()
        .render(value! { x: "nunca" })
        .unwrap();
    assert_eq!(result, "abc");
}

#[test]
fn render_literals() {
    let result = Engine::new()
        .compile(r#"{{ "hola" }}|{{ 'a\'b' }}|{{ "a\tb" }}|{{ -5 }}|{{ 0.5 }}|{{ true }}|{{ null }}|{{ undefined }}"#)
        .unwrap()
        .render(value! { x: 1 })
        .unwrap();
    assert_eq!(result, "hola|a'b|a\tb|-5|0.5|true||");
}

#[test]
fn render_this() {
    let result = Engine::new()
        .compile("{{ this.a }}{{#with b}}{{ this }}{{ . }}{{/with}}")
        .unwrap()
        .render(value! { a: "x", b: "y" })
        .unwrap();
    assert_eq!(result, "xyy");
}

#[test]
fn render_helper_call() {
    let result = Engine::new()
        .compile("CC No. {{formatId id}}")
        .unwrap()
        .render(value! { id: "1234567" })
        .unwrap();
    assert_eq!(result, "CC No. 1.234.567");
}

#[test]
fn render_helper_subexpression() {
    let result = Engine::new()
        .compile(r#"{{calculateFolios (filterByQueryResult xs "Positivo") 1}}"#)
        .unwrap()
        .render(value! {
            xs: [
                { queryResult: "Positivo" },
                { queryResult: "Negativo" },
            ]
        })
        .unwrap();
    assert_eq!(result, "1");
}

#[test]
fn render_helper_nested_subexpressions() {
    let result = Engine::new()
        .compile("{{#if (gt (arrayLength xs) 1)}}varios{{else}}uno{{/if}}")
        .unwrap()
        .render(value! { xs: ["a", "b"] })
        .unwrap();
    assert_eq!(result, "varios");
}

#[test]
fn render_bare_helper_name_calls_helper() {
    let result = Engine::new()
        .compile("{{arrayLength}}")
        .unwrap()
        .render(value! { arrayLength: "ignorado" })
        .unwrap();
    assert_eq!(result, "0");
}

#[test]
fn render_helper_alias() {
    let result = Engine::new()
        .compile("{{formatDateProse fecha}}")
        .unwrap()
        .render(value! { fecha: "15/07/2024" })
        .unwrap();
    assert_eq!(result, "15 de julio de 2024");
}

#[test]
fn render_if_else() {
    let engine = Engine::new();
    let template = engine.compile("{{#if a}}si{{else}}no{{/if}}").unwrap();
    assert_eq!(template.render(value! { a: true }).unwrap(), "si");
    assert_eq!(template.render(value! { a: false }).unwrap(), "no");
    assert_eq!(template.render(value! { a: [] }).unwrap(), "no");
    assert_eq!(template.render(value! { a: "" }).unwrap(), "no");
    assert_eq!(template.render(value! { a: 0 }).unwrap(), "no");
    assert_eq!(template.render(value! { a: {} }).unwrap(), "si");
    assert_eq!(template.render(value! { b: 1 }).unwrap(), "no");
}

#[test]
fn render_if_without_else() {
    let engine = Engine::new();
    let template = engine.compile("a{{#if x}}b{{/if}}c").unwrap();
    assert_eq!(template.render(value! { x: 1 }).unwrap(), "abc");
    assert_eq!(template.render(value! { x: None }).unwrap(), "ac");
}

#[test]
fn render_unless() {
    let engine = Engine::new();
    let template = engine.compile("{{#unless a}}x{{else}}y{{/unless}}").unwrap();
    assert_eq!(template.render(value! { a: 0 }).unwrap(), "x");
    assert_eq!(template.render(value! { a: "s" }).unwrap(), "y");
}

#[test]
fn render_else_chain() {
    let engine = Engine::new();
    let template = engine
        .compile("{{#if a}}A{{else if b}}B{{else unless c}}C{{else}}D{{/if}}")
        .unwrap();
    let cases = [
        (value! { a: true, b: true, c: true }, "A"),
        (value! { a: false, b: true, c: true }, "B"),
        (value! { a: false, b: false, c: false }, "C"),
        (value! { a: false, b: false, c: true }, "D"),
    ];
    for (ctx, expected) in cases {
        assert_eq!(template.render_from(&ctx).unwrap(), expected);
    }
}

#[test]
fn render_caret_else() {
    let result = Engine::new()
        .compile("{{#if a}}A{{^}}B{{/if}}")
        .unwrap()
        .render(value! { a: false })
        .unwrap();
    assert_eq!(result, "B");
}

#[test]
fn render_each_list() {
    let result = Engine::new()
        .compile("{{#each xs}}{{@index}}:{{this}}{{#unless @last}},{{/unless}}{{/each}}")
        .unwrap()
        .render(value! { xs: ["a", "b", "c"] })
        .unwrap();
    assert_eq!(result, "0:a,1:b,2:c");
}

#[test]
fn render_each_first() {
    let result = Engine::new()
        .compile("{{#each xs}}{{#if @first}}[{{/if}}{{.}}{{/each}}]")
        .unwrap()
        .render(value! { xs: ["a", "b"] })
        .unwrap();
    assert_eq!(result, "[ab]");
}

#[test]
fn render_each_map() {
    let result = Engine::new()
        .compile("{{#each m}}{{@key}}={{this}};{{/each}}")
        .unwrap()
        .render(value! { m: { b: 2, a: 1 } })
        .unwrap();
    assert_eq!(result, "a=1;b=2;");
}

#[test]
fn render_each_block_params() {
    let result = Engine::new()
        .compile("{{#each xs as |x i|}}{{i}}-{{x.n}} {{/each}}")
        .unwrap()
        .render(value! { xs: [{ n: "a" }, { n: "b" }] })
        .unwrap();
    assert_eq!(result, "0-a 1-b ");
}

#[test]
fn render_each_else() {
    let engine = Engine::new();
    let template = engine
        .compile("{{#each xs}}x{{else}}vacío{{/each}}")
        .unwrap();
    assert_eq!(template.render(value! { xs: [] }).unwrap(), "vacío");
    assert_eq!(template.render(value! { xs: "texto" }).unwrap(), "vacío");
    assert_eq!(template.render(value! { ys: [1] }).unwrap(), "vacío");
    assert_eq!(template.render(value! { xs: [1, 2] }).unwrap(), "xx");
}

#[test]
fn render_each_parent_access() {
    let result = Engine::new()
        .compile("{{#each grupos}}{{#each miembros}}{{../nombre}}/{{this}} {{/each}}{{/each}}")
        .unwrap()
        .render(value! {
            grupos: [
                { nombre: "G1", miembros: ["a", "b"] },
                { nombre: "G2", miembros: ["c"] },
            ]
        })
        .unwrap();
    assert_eq!(result, "G1/a G1/b G2/c ");
}

#[test]
fn render_each_root_access() {
    let result = Engine::new()
        .compile("{{#each xs}}{{@root.t}}-{{this}} {{/each}}")
        .unwrap()
        .render(value! { t: "T", xs: ["a", "b"] })
        .unwrap();
    assert_eq!(result, "T-a T-b ");
}

#[test]
fn render_each_no_implicit_parent_lookup() {
    let result = Engine::new()
        .compile("{{#each xs}}[{{titulo}}]{{/each}}")
        .unwrap()
        .render(value! { titulo: "T", xs: [{ n: 1 }] })
        .unwrap();
    assert_eq!(result, "[]");
}

#[test]
fn render_each_nested_data_variables() {
    let result = Engine::new()
        .compile("{{#each xs as |x|}}{{#each x}}{{@index}}{{/each}}{{@index}};{{/each}}")
        .unwrap()
        .render(value! { xs: [["a", "b"], ["c"]] })
        .unwrap();
    assert_eq!(result, "010;01;");
}

#[test]
fn render_with() {
    let result = Engine::new()
        .compile("{{#with persona}}{{nombre}}{{/with}}")
        .unwrap()
        .render(value! { persona: { nombre: "Ana" } })
        .unwrap();
    assert_eq!(result, "Ana");
}

#[test]
fn render_with_block_param() {
    let result = Engine::new()
        .compile("{{#with persona as |p|}}{{p.nombre}} {{nombre}}{{/with}}")
        .unwrap()
        .render(value! { persona: { nombre: "Ana" } })
        .unwrap();
    assert_eq!(result, "Ana Ana");
}

#[test]
fn render_with_empty_takes_else() {
    let engine = Engine::new();
    let template = engine
        .compile("{{#with xs}}x{{else}}vacío{{/with}}")
        .unwrap();
    assert_eq!(template.render(value! { xs: [] }).unwrap(), "vacío");
    assert_eq!(template.render(value! { xs: None }).unwrap(), "vacío");
    assert_eq!(template.render(value! { xs: [1] }).unwrap(), "x");
}

#[test]
fn render_with_zero_rescopes() {
    let result = Engine::new()
        .compile("{{#with n}}[{{this}}]{{else}}vacío{{/with}}")
        .unwrap()
        .render(value! { n: 0 })
        .unwrap();
    assert_eq!(result, "[0]");
}

#[test]
fn render_with_subexpression_and_length() {
    let result = Engine::new()
        .compile(
            "{{#with (filterByQueryResult xs \"Positivo\") as |p|}}{{p.length}}{{else}}ninguno{{/with}}",
        )
        .unwrap()
        .render(value! {
            xs: [
                { queryResult: "Positivo" },
                { queryResult: "Negativo" },
                { queryResult: "Positivo" },
            ]
        })
        .unwrap();
    assert_eq!(result, "2");
}

#[test]
fn render_block_params_shadow_outer() {
    let result = Engine::new()
        .compile("{{#each xs as |x|}}{{#with ../otro as |x|}}{{x}}{{/with}}{{x}}{{/each}}")
        .unwrap()
        .render(value! { xs: ["a"], otro: "B" })
        .unwrap();
    assert_eq!(result, "Ba");
}

#[test]
fn render_block_helpers() {
    let engine = Engine::new();
    let template = engine
        .compile(
            "{{#isCartagena m}}C{{else}}{{#isCorregimiento m}}R{{else}}M{{/isCorregimiento}}{{/isCartagena}}",
        )
        .unwrap();
    assert_eq!(template.render(value! { m: "cartagena" }).unwrap(), "C");
    assert_eq!(template.render(value! { m: "Bayunca" }).unwrap(), "R");
    assert_eq!(template.render(value! { m: "Turbaco" }).unwrap(), "M");
    assert_eq!(template.render(value! { m: None }).unwrap(), "M");
}

#[test]
fn render_block_helper_else_chain() {
    let engine = Engine::new();
    let template = engine
        .compile("{{#isCartagena m}}C{{else isCorregimiento m}}R{{else}}M{{/isCartagena}}")
        .unwrap();
    assert_eq!(template.render(value! { m: "CARTAGENA" }).unwrap(), "C");
    assert_eq!(template.render(value! { m: "Barú" }).unwrap(), "R");
    assert_eq!(template.render(value! { m: "Turbaco" }).unwrap(), "M");
}

#[test]
fn render_standalone_block_lines() {
    let result = Engine::new()
        .compile("Lista:\n{{#each xs}}\n- {{this}}\n{{/each}}\nFin\n")
        .unwrap()
        .render(value! { xs: ["a", "b"] })
        .unwrap();
    assert_eq!(result, "Lista:\n- a\n- b\nFin\n");
}

#[test]
fn render_standalone_indented() {
    let result = Engine::new()
        .compile("  {{#if a}}\n  x\n  {{/if}}\n")
        .unwrap()
        .render(value! { a: true })
        .unwrap();
    assert_eq!(result, "  x\n");
}

#[test]
fn render_standalone_else() {
    let result = Engine::new()
        .compile("{{#if a}}\nsi\n{{else}}\nno\n{{/if}}\n")
        .unwrap()
        .render(value! { a: false })
        .unwrap();
    assert_eq!(result, "no\n");
}

#[test]
fn render_standalone_comment() {
    let result = Engine::new()
        .compile("a\n{{! nota }}\nb")
        .unwrap()
        .render(value! { x: 1 })
        .unwrap();
    assert_eq!(result, "a\nb");
}

#[test]
fn render_not_standalone_with_content() {
    let result = Engine::new()
        .compile("{{#if a}}x{{/if}}\ny {{#if a}}\nz{{/if}}")
        .unwrap()
        .render(value! { a: true })
        .unwrap();
    assert_eq!(result, "x\ny \nz");
}

#[test]
fn render_inline_expr_is_never_standalone() {
    let result = Engine::new()
        .compile("a\n{{ x }}\nb")
        .unwrap()
        .render(value! { x: "" })
        .unwrap();
    assert_eq!(result, "a\n\nb");
}

#[test]
fn render_trim_markers() {
    let result = Engine::new()
        .compile("a  {{~ x ~}}  b")
        .unwrap()
        .render(value! { x: "X" })
        .unwrap();
    assert_eq!(result, "aXb");
}

#[test]
fn render_trim_markers_on_blocks() {
    let result = Engine::new()
        .compile("{{#if a~}}\n  x\n{{~/if}}")
        .unwrap()
        .render(value! { a: true })
        .unwrap();
    assert_eq!(result, "x");
}

#[test]
fn render_trim_markers_on_comments() {
    let result = Engine::new()
        .compile("a \n {{~! nota ~}} \n b")
        .unwrap()
        .render(value! { x: 1 })
        .unwrap();
    assert_eq!(result, "ab");
}

#[test]
fn render_serde_struct() {
    #[derive(serde::Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Ctx {
        event_municipality: String,
        penitentiary_name: Option<String>,
    }

    let result = Engine::new()
        .compile("{{eventMunicipality}}[{{penitentiaryName}}]")
        .unwrap()
        .render(Ctx {
            event_municipality: "Turbaco".into(),
            penitentiary_name: None,
        })
        .unwrap();
    assert_eq!(result, "Turbaco[]");
}

#[test]
fn render_does_not_mutate_context() {
    let ctx = value! { xs: [{ n: 1 }, { n: 2 }] };
    let before = ctx.clone();
    Engine::new()
        .render("{{#each xs as |x|}}{{x.n}}{{/each}}", &ctx)
        .unwrap();
    assert_eq!(ctx, before);
}
