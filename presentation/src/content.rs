use shared::utils::truncate_label;

pub const EXAMPLE_PROMPTS: [&str; 4] = [
    "ما هو الإعراب؟",
    "قام زيدٌ",
    "ما هي علامات الرفع؟",
    "المستثنى بإلّا ينصب إذا كان الكلام تامًا موجبًا",
];

/// Longest example label shown before truncation.
pub const EXAMPLE_LABEL_CHARS: usize = 25;

pub const RESET_CONFIRMATION: &str =
    "Apakah Anda yakin ingin memulai percakapan baru? Semua riwayat percakapan akan dihapus.";

pub const THINKING: &str = "Sedang berpikir...";
pub const MORE_BELOW: &str = "Ada pesan di bawah (/bottom untuk turun)";
pub const EMPTY_QUESTION: &str = "Pertanyaan tidak boleh kosong.";

pub const LIMITED_KNOWLEDGE_TITLE: &str = "Pengetahuan Terbatas - Gunakan dengan Bijak";

pub const LIMITED_KNOWLEDGE_TEXT: &str = "\
AI ini hanya menggunakan pengetahuan dari kitab \"Mukhtashor Jiddan Syarah\" karya Syekh Ahmad Zaini Dahlan. \
Verifikasi informasi linguistik atau Islam yang penting dengan ulama yang berkualifikasi.";

pub const ABOUT_TITLE: &str = "Tentang Kitab Mukhtashor Jiddan Syarah";

pub const ABOUT_TEXT: &str = "\
Kitab Mukhtashor Jiddan Syarah adalah syarah (penjelasan) atas kitab Matan Al-Ajurumiyyah \
karya Imam Shonhaji yang ditulis oleh Syekh Ahmad Zaini Dahlan. Kitab ini berisi tentang \
dasar-dasar ilmu Nahwu (tata bahasa Arab) dengan penjelasan ringkas namun mendalam.

Konsep-konsep kunci dalam Nahwu yang dibahas dalam kitab ini meliputi:
  - I'rab (إعراب): sistem akhiran kasus yang menandai fungsi gramatikal sebuah kata
  - Marfu'at (مرفوعات): kata-kata dengan akhiran kasus nominatif (biasanya subjek)
  - Mansubat (منصوبات): kata-kata dengan akhiran kasus akusatif (biasanya objek)
  - Majrurat (مجرورات): kata-kata dengan akhiran kasus genitif (biasanya setelah preposisi)

AI ini hanya menggunakan pengetahuan dari kitab ini dan tidak menggunakan sumber pengetahuan lain.";

pub const REPL_HELP: &str = "\
Perintah:
  /examples     tampilkan contoh pertanyaan
  /example N    isi input dengan contoh ke-N (tidak langsung dikirim)
  /reset        mulai percakapan baru
  /up, /down    gulir riwayat percakapan
  /bottom       kembali ke pesan terbaru
  /help         tampilkan bantuan ini
  /quit         keluar";

/// Numbered, truncated example labels.
pub fn example_labels() -> Vec<String> {
    EXAMPLE_PROMPTS
        .iter()
        .enumerate()
        .map(|(i, prompt)| format!("[{}] {}", i + 1, truncate_label(prompt, EXAMPLE_LABEL_CHARS)))
        .collect()
}

/// 1-based lookup used by `/example N`.
pub fn example(number: usize) -> Option<&'static str> {
    number
        .checked_sub(1)
        .and_then(|index| EXAMPLE_PROMPTS.get(index))
        .copied()
}
