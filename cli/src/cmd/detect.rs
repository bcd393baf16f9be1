use error_stack::Result;

use spiral_core::error::SpiralError;
use spiral_core::pitch;
use spiral_core::recognize::detect_chord;

pub fn run_detect(notes: &[String]) -> Result<(), SpiralError> {
  let pitches = notes
    .iter()
    .map(|n| pitch::parse(n))
    .collect::<Result<Vec<_>, SpiralError>>()?;

  let names: Vec<&str> = pitches.iter().map(|p| p.full_name.as_str()).collect();
  match detect_chord(pitches.iter().map(|p| p.midi)) {
    Some(chord) => println!("{}: {chord}", names.join(" ")),
    None => println!("{}: no chord", names.join(" ")),
  }
  Ok(())
}
