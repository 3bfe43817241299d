//! Fixed fallback dataset
//!
//! When the upstream catalog is unreachable, full ingestion degrades to this
//! small illustrative dataset instead of erroring: consumers always get a
//! schema-valid snapshot. Two events, enough to exercise every entity kind.

use crate::model::{Participant, Piece, RawEvent};

/// The two illustrative fallback events.
pub fn events() -> Vec<RawEvent> {
    vec![
        RawEvent {
            id: Some(1),
            name: Some("Concierto de piano en el Municipal".into()),
            location: Some("Teatro Municipal, Santiago (Chile)".into()),
            event_type: Some("Concierto".into()),
            cycle: Some("Temporada Oficial".into()),
            year: Some(1967),
            participants: vec![
                Participant {
                    name: Some("Claudio Arrau".into()),
                    activity: Some("Pianista - Piano".into()),
                    gender: Some("Masculino".into()),
                },
                Participant {
                    name: Some("Orquesta Sinfónica de Chile".into()),
                    activity: Some("Ensamble - Orquesta".into()),
                    gender: None,
                },
            ],
            program: vec![Piece {
                piece_name: Some("Concierto para piano n.º 5".into()),
                composers: vec!["Beethoven".into()],
                premiere_type: Some("Estreno en Chile".into()),
            }],
        },
        RawEvent {
            id: Some(2),
            name: Some("Sinfonía de cámara en Valparaíso".into()),
            location: Some("Sala A, Valparaíso".into()),
            event_type: Some("Sinfonía".into()),
            cycle: None,
            year: Some(1972),
            participants: vec![
                Participant {
                    name: Some("Patricia Cifuentes".into()),
                    activity: Some("Violinista - Violin".into()),
                    gender: Some("Femenino".into()),
                },
                Participant {
                    name: Some("Jorge Román".into()),
                    activity: Some("Cellista - Cello".into()),
                    gender: Some("Masculino".into()),
                },
            ],
            program: vec![Piece {
                piece_name: Some("Suite para cello n.º 1".into()),
                composers: vec!["Bach".into()],
                premiere_type: None,
            }],
        },
    ]
}
