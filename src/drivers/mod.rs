pub mod main_rotor;
