//! Global state for the authenticated shell

use dioxus::prelude::*;

use tienda_core::models::{Configuracion, ContadoresNotificacion};

/// State shared by the screens inside the application layout.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Badge counters, refreshed in the background
    pub contadores: Signal<ContadoresNotificacion>,
    /// Store settings: currency symbol, discount limits
    pub configuracion: Signal<Configuracion>,
    /// Global search overlay
    pub search_open: Signal<bool>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            contadores: Signal::new(ContadoresNotificacion::default()),
            configuracion: Signal::new(Configuracion::default()),
            search_open: Signal::new(false),
        }
    }

    pub fn simbolo(&self) -> String {
        self.configuracion.read().simbolo_moneda.clone()
    }

    pub fn set_contadores(mut self, contadores: ContadoresNotificacion) {
        if *self.contadores.peek() != contadores {
            self.contadores.set(contadores);
        }
    }

    pub fn set_configuracion(mut self, configuracion: Configuracion) {
        self.configuracion.set(configuracion);
    }

    pub fn open_search(mut self) {
        self.search_open.set(true);
    }

    pub fn close_search(mut self) {
        self.search_open.set(false);
    }
}

/// Hook to access the shell state
pub fn use_app_state() -> AppState {
    use_context::<AppState>()
}
