use wasm_bindgen::prelude::*;
use reaction_engine::*;

mod game;
mod interaction;
mod panel;
mod tutorial;

use game::ChemistryClassroom;

reaction_web::export_lab!(ChemistryClassroom, "chemistry-classroom");
