//! Geography of the Cartagena district.

/// The name of the district capital, lower case.
pub const CARTAGENA: &str = "cartagena";

/// The rural townships (corregimientos) of Cartagena, lower case.
pub const CORREGIMIENTOS: [&str; 19] = [
    "punta arena",
    "caño del oro",
    "tierrabomba",
    "bocachica",
    "ararca",
    "barú",
    "santa ana",
    "islas del rosario",
    "bayunca",
    "la boquilla",
    "pasacaballos",
    "pontezuela",
    "tierra baja",
    "punta canoa",
    "membrillal",
    "manzanillo del mar",
    "arroyo grande",
    "arroyo de piedra",
    "arroyo de las canoas",
];
