use plantilla::{value, Engine, Helpers, Value};

#[track_caller]
fn render(source: &str, ctx: Value) -> String {
    Engine::new().compile(source).unwrap().render_from(&ctx).unwrap()
}

#[test]
fn helpers_format_date() {
    let template = "{{formatDate d}}";
    assert_eq!(render(template, value! { d: "2024-07-15" }), "15 de julio de 2024");
    assert_eq!(render(template, value! { d: "15/07/2024" }), "15 de julio de 2024");
    assert_eq!(render(template, value! { d: "not-a-date" }), "not-a-date");
    assert_eq!(render(template, value! { d: "" }), "N/A");
    assert_eq!(render(template, value! { x: 1 }), "N/A");
}

#[test]
fn helpers_format_id() {
    let template = "{{formatId id}}|{{formatThousands id}}";
    assert_eq!(
        render(template, value! { id: "1234567890" }),
        "1.234.567.890|1.234.567.890"
    );
    assert_eq!(render(template, value! { id: "0012" }), "12|12");
    assert_eq!(render(template, value! { id: "N/A" }), "N/A|N/A");
    assert_eq!(render(template, value! { id: 123 }), "|");
}

#[test]
fn helpers_format_id_long_number() {
    assert_eq!(
        render("{{formatId id}}", value! { id: "123456789012345678901234" }),
        "123.456.789.012.345.678.901.234"
    );
}

#[test]
fn helpers_id_no_dots() {
    assert_eq!(
        render("{{idNoDots id}}.pdf", value! { id: "1.234.567,8" }),
        "12345678.pdf"
    );
    assert_eq!(render("[{{stripSeparators id}}]", value! { x: 1 }), "[]");
}

#[test]
fn helpers_to_upper_case() {
    assert_eq!(
        render("{{toUpperCase n}}", value! { n: "josé núñez" }),
        "JOSÉ NÚÑEZ"
    );
    assert_eq!(render("[{{toUpperCaseSafe n}}]", value! { n: 7 }), "[]");
}

#[test]
fn helpers_array_length() {
    assert_eq!(render("{{arrayLength xs}}", value! { xs: [1, 2, 3] }), "3");
    assert_eq!(render("{{length xs}}", value! { xs: "abc" }), "0");
}

#[test]
fn helpers_join() {
    let template = "{{join xs 'n' ', ' 'y'}}";
    let people = |names: &[&str]| {
        let list: Vec<Value> = names.iter().map(|n| value! { n: *n }).collect();
        value! { xs: list }
    };
    assert_eq!(render(template, people(&[])), "");
    assert_eq!(render(template, people(&["A"])), "A");
    assert_eq!(render(template, people(&["A", "B"])), "A y B");
    assert_eq!(render(template, people(&["A", "B", "C"])), "A, B y C");
}

#[test]
fn helpers_join_padded_conjunction() {
    let template = "{{join xs 'n' ', ' ' y '}}";
    let ctx = value! { xs: [{ n: "A" }, { n: "B" }, { n: "C" }] };
    assert_eq!(render(template, ctx), "A, B  y  C");
    let ctx = value! { xs: [{ n: "A" }, { n: "B" }] };
    assert_eq!(render(template, ctx), "A  y  B");
}

#[test]
fn helpers_join_plain() {
    assert_eq!(
        render("{{joinWithConjunction xs}}", value! { xs: ["a", "b", "c"] }),
        "a, b, c"
    );
    assert_eq!(
        render("{{join xs '' ' / '}}", value! { xs: ["a", "b"] }),
        "a / b"
    );
}

#[test]
fn helpers_filter_by_query_result_preserves_order() {
    let ctx = value! {
        xs: [
            { n: "1", queryResult: "Positivo" },
            { n: "2", queryResult: "Negativo" },
            { n: "3", queryResult: "Positivo" },
            { n: "4", queryResult: "" },
        ]
    };
    assert_eq!(
        render(
            r#"{{#each (filterByQueryResult xs "Positivo")}}{{n}}{{/each}}"#,
            ctx.clone()
        ),
        "13"
    );
    assert_eq!(
        render(r#"{{#each (filterByQueryResult xs "")}}{{n}}{{/each}}"#, ctx),
        "4"
    );
}

#[test]
fn helpers_filter_positive_in_paragraph_engine() {
    let ctx = value! {
        xs: [
            { n: "1", queryResult: "Negativo" },
            { n: "2", queryResult: "Positivo" },
        ]
    };
    let result = Engine::with_helpers(Helpers::paragraphs())
        .compile("{{#each (filterAdditionalAccusedWithPositiveResult xs)}}{{n}}{{/each}}")
        .unwrap()
        .render_from(&ctx)
        .unwrap();
    assert_eq!(result, "2");
}

#[test]
fn helpers_calculate_folios_boundaries() {
    for (len, folios) in [(0, "1"), (4, "1"), (5, "1"), (6, "2"), (10, "2"), (11, "3")] {
        let ctx = value! { xs: vec![0; len] };
        assert_eq!(render("{{calculateFolios xs 5}}", ctx), folios, "len {len}");
    }
}

#[test]
fn helpers_calculate_folios_default_divisor() {
    let ctx = value! { xs: vec![0; 6] };
    assert_eq!(render("{{calculateFolios xs}}", ctx.clone()), "2");
    assert_eq!(render("{{calculateFolios xs 0}}", ctx.clone()), "2");
    assert_eq!(render("{{calculateFolios xs 'x'}}", ctx.clone()), "2");
    assert_eq!(render("{{calculateFolios xs '3'}}", ctx), "2");
    assert_eq!(render("{{calculateFolios missing 5}}", value! { x: 1 }), "1");
}

#[test]
fn helpers_calculate_folios_of_positive_entries() {
    let ctx = value! {
        xs: [
            { queryResult: "Positivo" },
            { queryResult: "Negativo" },
        ]
    };
    assert_eq!(
        render(
            r#"{{calculateFolios (filterByQueryResult xs "Positivo") 1}}"#,
            ctx
        ),
        "1"
    );
}

#[test]
fn helpers_comparisons() {
    let ctx = value! { a: 2, b: 3, s: "Positivo" };
    assert_eq!(render("{{gt b a}} {{lt b a}} {{gte a 2}} {{lte a 1}}", ctx.clone()), "true false true false");
    assert_eq!(
        render(
            r#"{{greaterThan b a}} {{lessThan a b}} {{greaterOrEqual a b}} {{lessOrEqual a b}}"#,
            ctx.clone()
        ),
        "true true false true"
    );
    assert_eq!(
        render(r#"{{eq s "Positivo"}} {{equals a 2.0}} {{eq a "2"}}"#, ctx),
        "true true false"
    );
}

#[test]
fn helpers_comparisons_missing_values() {
    assert_eq!(
        render("{{gt nada 0}} {{lt nada 0}}", value! { x: 1 }),
        "false false"
    );
}

#[test]
fn helpers_subtract() {
    assert_eq!(render("{{subtract xs.length 2}}", value! { xs: [1, 2, 3] }), "1");
    assert_eq!(render("{{subtract 2.5 1}}", value! { x: 1 }), "1.5");
    assert_eq!(render("[{{subtract a 1}}]", value! { a: "x" }), "[]");
}

#[test]
fn helpers_municipality_branches() {
    let template = "{{#isCartagena m}}ciudad{{else}}{{#isCorregimiento m}}corregimiento{{else}}municipio{{/isCorregimiento}}{{/isCartagena}}";
    assert_eq!(render(template, value! { m: "Cartagena" }), "ciudad");
    assert_eq!(render(template, value! { m: "cartagena" }), "ciudad");
    assert_eq!(render(template, value! { m: "Pasacaballos" }), "corregimiento");
    assert_eq!(render(template, value! { m: "ISLAS DEL ROSARIO" }), "corregimiento");
    assert_eq!(render(template, value! { m: "Turbaco" }), "municipio");
    assert_eq!(render(template, value! { m: 1 }), "municipio");
}

#[test]
fn helpers_custom() {
    let mut helpers = Helpers::core();
    helpers.add_inline("saludo", |args| Value::from(format!("Hola {}", args.get(0))));
    helpers.add_block("esPar", |args| matches!(args.get(0), Value::Integer(n) if n % 2 == 0));
    let result = Engine::with_helpers(helpers)
        .compile("{{saludo n}} {{#esPar 4}}par{{else}}impar{{/esPar}}")
        .unwrap()
        .render(value! { n: "Ana" })
        .unwrap();
    assert_eq!(result, "Hola Ana par");
}
