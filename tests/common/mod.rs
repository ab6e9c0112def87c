use chrono::{NaiveDate, NaiveTime};
use fake::Fake;
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::Word;
use schoolgate::schoolgate_models::{
    Assessment, AssessmentId, AssessmentKind, Attendance, AttendanceId, AttendanceStatus, Class,
    ClassId, ClassSubject, ClassSubjectId, Department, DepartmentId, Grade, GradeId, School,
    SchoolId, Student, StudentId, Subject, SubjectId, Teacher, TeacherId, TimetableEntry,
    TimetableEntryId, UserId, Weekday,
};
use schoolgate::{AuthzConfig, Authorizer, IdentityContext, SchoolDirectory, Target};

pub const YEAR: &str = "2024-2025";

/// One school with a growing relationship graph.
#[allow(dead_code)]
pub struct Campus {
    pub directory: SchoolDirectory,
    pub school: School,
    pub department: Department,
    next_number: u32,
}

#[allow(dead_code)]
impl Campus {
    pub fn new() -> Self {
        let school = School {
            id: SchoolId::new(),
            name: CompanyName().fake(),
            email: SafeEmail().fake(),
        };
        let department = Department {
            id: DepartmentId::new(),
            name: "Mathematics".to_string(),
            school_id: school.id,
            head_of_department: None,
        };
        Self {
            directory: SchoolDirectory::new(),
            school,
            department,
            next_number: 0,
        }
    }

    fn next(&mut self) -> u32 {
        self.next_number += 1;
        self.next_number
    }

    pub fn teacher(&mut self) -> Teacher {
        let n = self.next();
        Teacher {
            id: TeacherId::new(),
            user_id: UserId::new(),
            employee_id: format!("EMP{:04}", n),
            department_id: self.department.id,
            is_active: true,
        }
    }

    pub fn class(&mut self, level: i32, section: &str, class_teacher: Option<TeacherId>) -> Class {
        let class = Class {
            id: ClassId::new(),
            name: format!("Grade {}{}", level, section),
            level,
            section: section.to_string(),
            school_id: self.school.id,
            class_teacher,
            academic_year: YEAR.to_string(),
        };
        self.directory.insert_class(class.clone());
        class
    }

    /// Assigns `teacher` to a fresh subject in `class`.
    pub fn teach(&mut self, class: &Class, teacher: TeacherId) -> ClassSubject {
        let assignment = ClassSubject {
            id: ClassSubjectId::new(),
            class_id: class.id,
            subject_id: SubjectId::new(),
            teacher_id: teacher,
            academic_year: YEAR.to_string(),
            periods_per_week: 5,
        };
        self.directory
            .insert_class_subject(assignment.clone())
            .expect("fresh subject never collides");
        assignment
    }

    pub fn enroll(&mut self, class: Option<&Class>) -> Student {
        let n = self.next();
        let student = Student {
            id: StudentId::new(),
            user_id: UserId::new(),
            student_id: format!("STU{:04}", n),
            admission_number: format!("ADM{:04}", n),
            current_class: class.map(|c| c.id),
            is_active: true,
        };
        self.directory.insert_student(student.clone());
        student
    }

    pub fn assessment(&mut self, assignment: &ClassSubject, published: bool) -> Assessment {
        let assessment = Assessment {
            id: AssessmentId::new(),
            name: format!("{} test", Word().fake::<String>()),
            class_subject_id: assignment.id,
            kind: AssessmentKind::Test,
            total_marks: 100,
            date: NaiveDate::from_ymd_opt(2024, 11, 4).expect("valid date"),
            is_published: published,
        };
        self.directory.insert_assessment(assessment.clone());
        assessment
    }

    pub fn publish(&mut self, assessment: &mut Assessment) {
        assessment.is_published = true;
        self.directory.insert_assessment(assessment.clone());
    }

    pub fn grade(&self, student: &Student, assessment: &Assessment, graded_by: TeacherId) -> Grade {
        Grade {
            id: GradeId::new(),
            student_id: student.id,
            assessment_id: assessment.id,
            marks_obtained: 72.5,
            graded_by,
        }
    }

    pub fn attendance(
        &self,
        student: &Student,
        assignment: Option<&ClassSubject>,
        marked_by: TeacherId,
    ) -> Attendance {
        Attendance {
            id: AttendanceId::new(),
            student_id: student.id,
            date: NaiveDate::from_ymd_opt(2024, 9, 9).expect("valid date"),
            status: AttendanceStatus::Present,
            class_subject_id: assignment.map(|a| a.id),
            marked_by,
        }
    }

    pub fn subject(&self) -> Subject {
        Subject {
            id: SubjectId::new(),
            name: "Algebra".to_string(),
            code: "MATH101".to_string(),
            department_id: self.department.id,
            is_active: true,
        }
    }

    pub fn timetable(&self, assignment: &ClassSubject) -> TimetableEntry {
        TimetableEntry {
            id: TimetableEntryId::new(),
            class_subject_id: assignment.id,
            day_of_week: Weekday::Monday,
            start_time: NaiveTime::from_hms_opt(8, 0, 0).expect("valid time"),
            end_time: NaiveTime::from_hms_opt(8, 45, 0).expect("valid time"),
            room_number: Some("B12".to_string()),
            academic_year: YEAR.to_string(),
        }
    }

    pub fn authorizer(&self) -> Authorizer<'_, SchoolDirectory> {
        Authorizer::new(&self.directory, AuthzConfig::default())
    }
}

/// One record of every kind, wired into the campus graph.
#[allow(dead_code)]
pub struct EveryRecord {
    pub school: School,
    pub department: Department,
    pub subject: Subject,
    pub teacher: Teacher,
    pub class: Class,
    pub assignment: ClassSubject,
    pub timetable: TimetableEntry,
    pub student: Student,
    pub attendance: Attendance,
    pub assessment: Assessment,
    pub grade: Grade,
}

#[allow(dead_code)]
impl EveryRecord {
    pub fn build(campus: &mut Campus) -> Self {
        let teacher = campus.teacher();
        let class = campus.class(10, "A", Some(teacher.id));
        let assignment = campus.teach(&class, teacher.id);
        let student = campus.enroll(Some(&class));
        let assessment = campus.assessment(&assignment, true);
        Self {
            school: campus.school.clone(),
            department: campus.department.clone(),
            subject: campus.subject(),
            timetable: campus.timetable(&assignment),
            attendance: campus.attendance(&student, Some(&assignment), teacher.id),
            grade: campus.grade(&student, &assessment, teacher.id),
            teacher,
            class,
            assignment,
            student,
            assessment,
        }
    }

    pub fn targets(&self) -> Vec<Target<'_>> {
        vec![
            Target::School(&self.school),
            Target::Department(&self.department),
            Target::Subject(&self.subject),
            Target::Teacher(&self.teacher),
            Target::Class(&self.class),
            Target::ClassSubject(&self.assignment),
            Target::Timetable(&self.timetable),
            Target::Student(&self.student),
            Target::Attendance(&self.attendance),
            Target::Assessment(&self.assessment),
            Target::Grade(&self.grade),
        ]
    }
}

#[allow(dead_code)]
pub fn teacher_identity(teacher: TeacherId) -> IdentityContext {
    IdentityContext::teacher(UserId::new(), teacher)
}

#[allow(dead_code)]
pub fn student_identity(student: &Student) -> IdentityContext {
    IdentityContext::student(student.user_id, student.id)
}
