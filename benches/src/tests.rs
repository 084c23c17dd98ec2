use crate::context::{Context, Person};
use crate::{Engine, Handlebars, Plantilla};

const SOURCE: &str = include_str!("../benchdata/accused.hbs");

fn render<E: Engine>(ctx: &Context) -> String {
    let mut engine = E::new();
    let template = engine.compile(SOURCE);
    E::render(&template, ctx)
}

fn person(name: &str, id: &str, positive: bool) -> Person {
    Person {
        name: name.to_owned(),
        id: id.to_owned(),
        positive,
    }
}

#[test]
fn plantilla() {
    let ctx = Context::new(
        "Consulta",
        vec![
            person("Ana Pérez", "123", true),
            person("Luis Gómez", "456", false),
        ],
    );
    let expected = "\
<h1>Consulta</h1>
<p>Se consultaron 2 personas.</p>
<ul>
  <li>0. Ana Pérez (123) positivo;</li>
  <li>1. Luis Gómez (456) negativo</li>
</ul>
<p>Primero: Ana Pérez</p>
";
    assert_eq!(render::<Plantilla>(&ctx), expected);
}

#[test]
fn plantilla_matches_handlebars() {
    let ctx = Context::new(
        "Consulta",
        vec![
            person("Ana Pérez", "123", true),
            person("Luis Gómez", "456", false),
            person("Eva Ruiz", "789", true),
        ],
    );
    assert_eq!(render::<Plantilla>(&ctx), render::<Handlebars>(&ctx));
}

#[test]
fn plantilla_matches_handlebars_empty() {
    let ctx = Context::new("Vacío", Vec::new());
    assert_eq!(render::<Plantilla>(&ctx), render::<Handlebars>(&ctx));
}
