use rand::Rng;

#[derive(Clone, serde::Serialize)]
pub struct Context {
    pub title: String,
    pub total: usize,
    pub accused: Vec<Person>,
    pub first: Option<Person>,
}

#[derive(Clone, serde::Serialize)]
pub struct Person {
    pub name: String,
    pub id: String,
    pub positive: bool,
}

impl Context {
    pub fn new(title: &str, accused: Vec<Person>) -> Self {
        Self {
            title: title.to_owned(),
            total: accused.len(),
            first: accused.first().cloned(),
            accused,
        }
    }
}

pub fn random(n: usize) -> Context {
    let mut rng = rand::thread_rng();
    let title: String = (0..20).map(|_| rng.gen_range('a'..='z')).collect();
    let accused = (0..n)
        .map(|_| Person {
            name: (0..20).map(|_| rng.gen_range('a'..='z')).collect(),
            id: rng.gen_range(1_000_000..9_999_999_999_u64).to_string(),
            positive: rng.gen_ratio(1, 2),
        })
        .collect();
    Context::new(&title, accused)
}
