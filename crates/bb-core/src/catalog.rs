//! Static venue / barber / service catalog
//!
//! Read-only reference data: loaded once at startup, shared by reference,
//! never mutated at runtime. The built-in tables mirror the production
//! shop; a TOML file can replace them wholesale.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

/// A barber working at a venue. The `calendar_id` is the provider-side
/// key every availability query and booking uses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Barber {
    pub id: String,
    pub name: String,
    pub rating: f32,
    pub calendar_id: String,
}

/// A shop location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Venue {
    pub id: String,
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub map_url: Option<String>,
    pub barbers: Vec<Barber>,
}

/// A bookable service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price_usd: u32,
    pub minutes: u32,
}

/// The full catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub venues: Vec<Venue>,
    pub services: Vec<Service>,
}

impl Catalog {
    /// Load a catalog from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let catalog: Catalog = toml::from_str(&content)?;
        Ok(catalog)
    }

    /// Find a barber by id, together with the venue employing them.
    pub fn barber(&self, barber_id: &str) -> Option<(&Venue, &Barber)> {
        self.venues.iter().find_map(|venue| {
            venue
                .barbers
                .iter()
                .find(|b| b.id == barber_id)
                .map(|b| (venue, b))
        })
    }

    /// Find a service by id.
    pub fn service(&self, service_id: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.id == service_id)
    }
}

fn barber(id: &str, name: &str, rating: f32) -> Barber {
    Barber {
        id: id.to_string(),
        name: name.to_string(),
        rating,
        calendar_id: format!("{}@wabisabibarber.example", id),
    }
}

fn service(id: &str, name: &str, description: &str, price_usd: u32, minutes: u32) -> Service {
    Service {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price_usd,
        minutes,
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            venues: vec![
                Venue {
                    id: "matriz".into(),
                    name: "Matriz".into(),
                    address: "Av. Unidad Nacional y Carabobo, Riobamba".into(),
                    map_url: Some(
                        "https://www.google.com/maps/place/Wabi+Sabi+Barber+Matriz/".into(),
                    ),
                    barbers: vec![barber("israel", "Israel", 4.9), barber("josue", "Josué", 4.7)],
                },
                Venue {
                    id: "centro".into(),
                    name: "Centro".into(),
                    address: "Calle Primera Constituyente, Riobamba".into(),
                    map_url: Some(
                        "https://www.google.com/maps/place/Wabi+Sabi+Barber+Centro/".into(),
                    ),
                    barbers: vec![
                        barber("santiago", "Santiago", 4.6),
                        barber("wilson", "Wilson", 4.8),
                    ],
                },
                Venue {
                    id: "urban".into(),
                    name: "Urban".into(),
                    address: "Calle Loja y Ayacucho, Riobamba".into(),
                    map_url: Some(
                        "https://www.google.com/maps/place/Wabi+Sabi+Barber+Urban/".into(),
                    ),
                    barbers: vec![barber("anthony", "Anthony", 4.6)],
                },
                Venue {
                    id: "veloz".into(),
                    name: "Veloz".into(),
                    address: "Av. Veloz y 9 de Octubre, Riobamba".into(),
                    map_url: Some(
                        "https://www.google.com/maps/place/Wabi+Sabi+Barber+Veloz/".into(),
                    ),
                    barbers: vec![barber("carlos", "Carlos", 4.5), barber("pablo", "Pablo", 4.6)],
                },
                Venue {
                    id: "training".into(),
                    name: "Barber Training".into(),
                    address: "Av. América y Mariana de Jesús, Riobamba".into(),
                    map_url: Some(
                        "https://www.google.com/maps/place/Wabi+Sabi+Barber+Training/".into(),
                    ),
                    barbers: vec![barber("jose", "José", 4.8)],
                },
            ],
            services: vec![
                service(
                    "corte-clasico",
                    "Corte de Cabello Clásico",
                    "Incluye diagnóstico, corte a máquina con disminución gradual en laterales, \
                     perfilado de nuca y patillas, y estilizado final.",
                    7,
                    40,
                ),
                service(
                    "corte-tendencia",
                    "Corte Tendencia (Fade o Degradado)",
                    "Degradado alto, medio o bajo, o Taper Fade con máquina y navaja, conexión \
                     con parte superior y asesoramiento de estilizado.",
                    8,
                    45,
                ),
                service(
                    "perfilado-cejas",
                    "Perfilado de Cejas",
                    "Perfilado con navaja o pinza, recorte profesional y aplicación de gel o \
                     tónico calmante.",
                    3,
                    15,
                ),
                service(
                    "cejas-cera",
                    "Diseño y Perfilado de Cejas con Cera",
                    "Asesoramiento según el rostro, eliminación de vello no deseado y recorte \
                     para un acabado limpio y natural.",
                    5,
                    20,
                ),
                service(
                    "perfilado-barba",
                    "Arreglo y Perfilado de Barba",
                    "Recorte y arreglo con tijera o máquina, delineado de contornos y \
                     humectación con aceite o bálsamo.",
                    5,
                    30,
                ),
                service(
                    "corte-y-barba",
                    "Corte de Cabello y Barba",
                    "Asesoramiento, corte, peinado con productos importados y arreglo de barba \
                     con aromáticos y toalla caliente.",
                    12,
                    60,
                ),
                service(
                    "barba-spa",
                    "Barba SPA (Ritual Tradicional)",
                    "Diseño personalizado, recorte, delineado con navaja, toalla caliente con \
                     vapor de ozono y aplicación de bálsamo hidratante.",
                    8,
                    45,
                ),
                service(
                    "asesoria-imagen",
                    "Asesoría de Imagen y Estilismo Personal",
                    "Consultoría personalizada: análisis de rostro, tipo de cabello, \
                     recomendación de corte, lavado y bebida de cortesía.",
                    15,
                    90,
                ),
                service(
                    "vip-completo",
                    "Servicio VIP Completo",
                    "Corte, lavado con masaje craneal, perfilado de barba con ritual de toalla \
                     caliente y mascarilla facial express.",
                    20,
                    120,
                ),
                service(
                    "vip-exclusivo",
                    "Ritual VIP Exclusivo",
                    "Corte + barba + cejas, productos de alta gama y bebida de cortesía.",
                    16,
                    90,
                ),
            ],
        }
    }
}
